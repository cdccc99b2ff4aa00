//! Rank & trend engine: řazení v konferenci + delta proti včerejšku.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Conference, ConferenceGroup, RankedRow, TeamRecord};

/// Canonical abbreviation → 1-based rank.
pub type PositionMap = HashMap<String, u32>;

/// Yesterday's ranks per conference — the trend baseline. Comes either from
/// the persisted snapshot or from the Basketball-Reference scrape; the
/// engine does not care which.
#[derive(Debug, Default, Clone)]
pub struct BaselinePositions {
    pub east: PositionMap,
    pub west: PositionMap,
}

impl BaselinePositions {
    pub fn for_conference(&self, conf: Conference) -> &PositionMap {
        match conf {
            Conference::East => &self.east,
            Conference::West => &self.west,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.east.is_empty() && self.west.is_empty()
    }
}

/// Fixed standings order: pct desc, wins desc, name asc. `sort_by` is stable,
/// so fully equal rows keep their input order across runs.
pub fn sort_by_standing(rows: &mut [TeamRecord]) {
    rows.sort_by(|a, b| {
        b.pct
            .partial_cmp(&a.pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
}

/// Rank one conference and attach movement against the baseline map.
///
/// delta = baseline_rank - rank (up = positive). Teams missing from the
/// baseline get `None`, which renders distinctly from "unchanged".
pub fn rank_with_trend(mut rows: Vec<TeamRecord>, baseline: &PositionMap) -> ConferenceGroup {
    sort_by_standing(&mut rows);
    rows.into_iter()
        .enumerate()
        .map(|(i, record)| {
            let rank = (i + 1) as u32;
            let delta = baseline
                .get(&record.abbr)
                .map(|&prev| prev as i32 - rank as i32);
            RankedRow { record, rank, delta }
        })
        .collect()
}
