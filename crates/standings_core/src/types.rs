//! Základní typy: tým, řádek tabulky, konference.

/// One of the two fixed conference groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    /// Nadpis bloku ve zprávě (ruská lokalizace)
    pub fn title_ru(&self) -> &'static str {
        match self {
            Conference::East => "Восточная конференция",
            Conference::West => "Западная конференция",
        }
    }
}

/// One team's current standing, fresh from a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub display_name: String,
    /// Canonical 3-letter code (ESPN scheme) — identity key across sources
    pub abbr: String,
    pub wins: u32,
    pub losses: u32,
    /// Win percentage in [0, 1]
    pub pct: f64,
}

impl TeamRecord {
    /// `pct` comes from upstream when it parsed; otherwise derived from W/L,
    /// 0.0 for a 0-0 team.
    pub fn new(
        display_name: String,
        abbr: String,
        wins: u32,
        losses: u32,
        pct: Option<f64>,
    ) -> Self {
        let pct = pct.unwrap_or_else(|| {
            if wins + losses > 0 {
                wins as f64 / (wins + losses) as f64
            } else {
                0.0
            }
        });
        Self { display_name, abbr, wins, losses, pct }
    }
}

/// `TeamRecord` with its computed rank and day-over-day movement.
#[derive(Debug, Clone)]
pub struct RankedRow {
    pub record: TeamRecord,
    /// 1-based position within the conference
    pub rank: u32,
    /// `baseline_rank - rank`; positive = moved up. `None` = no prior data,
    /// which renders differently from "unchanged".
    pub delta: Option<i32>,
}

/// Ranked rows of one conference, in rank order.
pub type ConferenceGroup = Vec<RankedRow>;
