//! Formatter: Telegram HTML zpráva s ruskými názvy a trend šipkami.

use chrono::{Datelike, NaiveDate};

use crate::teams;
use crate::types::{Conference, ConferenceGroup, TeamRecord};

/// Inclusive rank band annotated with the play-in marker, e.g. 7..=10.
pub type PlayInBand = (u32, u32);

const PLAY_IN_MARKER: &str = " — плей-ин";

/// Escape for Telegram parse_mode=HTML.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Trend glyph with magnitude: up/down arrows; "no prior data" gets its own
/// neutral glyph, distinct from "unchanged".
pub fn trend_arrow(delta: Option<i32>) -> String {
    match delta {
        Some(d) if d > 0 => format!("🟢▲+{d}"),
        Some(d) if d < 0 => format!("🔴▼{}", -d),
        Some(_) => "⚪︎=".to_string(),
        None => "⚪︎·".to_string(),
    }
}

/// `0.833` → `"83.3%"`
pub fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct * 100.0)
}

/// Games behind the conference leader; 0.0 for the leader itself.
pub fn games_behind(leader: &TeamRecord, row: &TeamRecord) -> f64 {
    let wins_gap = leader.wins as f64 - row.wins as f64;
    let losses_gap = row.losses as f64 - leader.losses as f64;
    (wins_gap + losses_gap) / 2.0
}

/// Date line in Russian: `"15 января 2026"`.
pub fn ru_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "января", "февраля", "марта", "апреля", "мая", "июня",
        "июля", "августа", "сентября", "октября", "ноября", "декабря",
    ];
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// One conference block: bold title, one line per team in rank order.
pub fn format_conference(
    title: &str,
    rows: &ConferenceGroup,
    play_in: Option<PlayInBand>,
) -> String {
    let mut out = vec![format!("<b>{}</b>", escape_html(title))];
    let leader = rows.first().map(|r| r.record.clone());
    for row in rows {
        let name = teams::ru_name(&row.record.abbr)
            .map(str::to_string)
            .unwrap_or_else(|| row.record.display_name.clone());
        let marker = match play_in {
            Some((from, to)) if (from..=to).contains(&row.rank) => PLAY_IN_MARKER,
            _ => "",
        };
        let gb = leader
            .as_ref()
            .map(|l| games_behind(l, &row.record))
            .unwrap_or(0.0);
        out.push(format!(
            "{:>2} {:>4}  {}  {}–{}  ({})  GB {:.1}{}",
            row.rank,
            trend_arrow(row.delta),
            escape_html(&name),
            row.record.wins,
            row.record.losses,
            format_pct(row.record.pct),
            gb,
            marker,
        ));
    }
    out.join("\n")
}

/// Whole digest: header, both conference blocks, source note.
pub fn build_message(
    date: NaiveDate,
    east: &ConferenceGroup,
    west: &ConferenceGroup,
    play_in: Option<PlayInBand>,
    baseline_note: &str,
) -> String {
    let head = format!(
        "<b>НБА · Таблица по конференциям</b> — {}",
        ru_date(date)
    );
    let info = format!(
        "ℹ️ Источники: ESPN (текущая таблица), {} (позиции на вчера).",
        escape_html(baseline_note)
    );
    [
        head,
        format_conference(Conference::East.title_ru(), east, play_in),
        format_conference(Conference::West.title_ru(), west, play_in),
        info,
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{rank_with_trend, PositionMap};
    use crate::types::TeamRecord;

    fn group(rows: &[(&str, &str, u32, u32)], baseline: &[(&str, u32)]) -> ConferenceGroup {
        let records = rows
            .iter()
            .map(|(name, abbr, w, l)| {
                TeamRecord::new(name.to_string(), abbr.to_string(), *w, *l, None)
            })
            .collect();
        let map: PositionMap = baseline
            .iter()
            .map(|(a, r)| (a.to_string(), *r))
            .collect();
        rank_with_trend(records, &map)
    }

    #[test]
    fn arrows_cover_all_cases() {
        assert_eq!(trend_arrow(Some(3)), "🟢▲+3");
        assert_eq!(trend_arrow(Some(-2)), "🔴▼2");
        assert_eq!(trend_arrow(Some(0)), "⚪︎=");
        assert_eq!(trend_arrow(None), "⚪︎·");
    }

    #[test]
    fn pct_has_one_decimal() {
        assert_eq!(format_pct(0.833), "83.3%");
        assert_eq!(format_pct(0.0), "0.0%");
        assert_eq!(format_pct(1.0), "100.0%");
    }

    #[test]
    fn games_behind_leader() {
        let leader = TeamRecord::new("A".into(), "AAA".into(), 10, 2, None);
        let chaser = TeamRecord::new("B".into(), "BBB".into(), 8, 4, None);
        assert_eq!(games_behind(&leader, &leader), 0.0);
        assert_eq!(games_behind(&leader, &chaser), 2.0);
    }

    #[test]
    fn rows_carry_games_behind_column() {
        let east = group(
            &[("Boston Celtics", "BOS", 10, 2), ("Miami Heat", "MIA", 7, 5)],
            &[],
        );
        let block = format_conference("Восток", &east, None);
        let lines: Vec<&str> = block.lines().collect();
        assert!(lines[1].contains("GB 0.0"));
        assert!(lines[2].contains("GB 3.0"));
    }

    #[test]
    fn ru_date_renders_genitive_month() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(ru_date(d), "15 января 2026");
    }

    #[test]
    fn known_team_uses_russian_name() {
        let east = group(&[("Boston Celtics", "BOS", 10, 2)], &[]);
        let block = format_conference("Восток", &east, None);
        assert!(block.contains("Бостон Селтикс"));
        assert!(!block.contains("Boston Celtics"));
    }

    #[test]
    fn unknown_team_falls_back_to_display_name() {
        let east = group(&[("Mystery <Team>", "XXX", 1, 1)], &[]);
        let block = format_conference("Восток", &east, None);
        // escaped, not raw
        assert!(block.contains("Mystery &lt;Team&gt;"));
    }

    #[test]
    fn play_in_band_marks_only_its_ranks() {
        let rows: Vec<(String, String)> = (0..12)
            .map(|i| (format!("Team {i:02}"), format!("T{i:02}")))
            .collect();
        let refs: Vec<(&str, &str, u32, u32)> = rows
            .iter()
            .enumerate()
            .map(|(i, (n, a))| (n.as_str(), a.as_str(), 30 - i as u32, i as u32))
            .collect();
        let east = group(&refs, &[]);
        let block = format_conference("Восток", &east, Some((7, 10)));
        let marked: Vec<&str> = block
            .lines()
            .filter(|l| l.contains(PLAY_IN_MARKER))
            .collect();
        assert_eq!(marked.len(), 4);
        assert!(marked[0].starts_with(" 7 "));
        assert!(marked[3].starts_with("10 "));
    }

    #[test]
    fn message_contains_header_and_both_blocks() {
        let east = group(&[("Boston Celtics", "BOS", 10, 2)], &[("BOS", 2)]);
        let west = group(&[("Denver Nuggets", "DEN", 9, 3)], &[]);
        let msg = build_message(
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            &east,
            &west,
            None,
            "снапшот",
        );
        assert!(msg.contains("<b>НБА · Таблица по конференциям</b> — 1 февраля 2026"));
        assert!(msg.contains("Восточная конференция"));
        assert!(msg.contains("Западная конференция"));
        assert!(msg.contains("🟢▲+1"));
    }
}
