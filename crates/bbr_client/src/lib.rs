//! Basketball-Reference baseline: pozice týmů k zadanému (včerejšímu) datu.
//!
//! Stránka `friv/standings.fcgi` má dvě tabulky kotvené nadpisy
//! "Eastern Conference" / "Western Conference"; pořadí řádků = rank.
//! Tým poznáme z odkazu `/teams/XXX/...`, jinak z textu odkazu.

use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use standings_core::teams::{abbr_for_name, canonical_abbr};
use standings_core::{BaselinePositions, Conference, PositionMap};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct BbrClient {
    client: reqwest::Client,
}

impl Default for BbrClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BbrClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Positions as of `date`. Any failure degrades to empty maps —
    /// the digest then just runs without trend arrows.
    pub async fn positions_for(&self, date: NaiveDate) -> BaselinePositions {
        match self.fetch_page(date).await {
            Ok(html) => {
                let positions = parse_positions(&html);
                debug!(
                    "bbr positions for {}: east={} west={}",
                    date,
                    positions.east.len(),
                    positions.west.len()
                );
                positions
            }
            Err(e) => {
                warn!("bbr standings fetch for {} failed: {}", date, e);
                BaselinePositions::default()
            }
        }
    }

    async fn fetch_page(&self, date: NaiveDate) -> Result<String> {
        use chrono::Datelike;
        let url = format!(
            "https://www.basketball-reference.com/friv/standings.fcgi?month={}&day={}&year={}",
            date.month(),
            date.day(),
            date.year()
        );
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }
        Ok(resp.text().await?)
    }
}

/// Walk headings and tables in document order; a conference heading arms the
/// next table as that conference's standings.
pub fn parse_positions(html: &str) -> BaselinePositions {
    let doc = Html::parse_document(html);
    let seq_sel = Selector::parse("h2, h3, table").unwrap();

    let mut out = BaselinePositions::default();
    let mut pending: Option<Conference> = None;
    for el in doc.select(&seq_sel) {
        match el.value().name() {
            "h2" | "h3" => {
                let text = el.text().collect::<String>();
                if text.contains("Eastern Conference") {
                    pending = Some(Conference::East);
                } else if text.contains("Western Conference") {
                    pending = Some(Conference::West);
                }
            }
            "table" => {
                if let Some(conf) = pending.take() {
                    let positions = table_positions(el);
                    match conf {
                        Conference::East => out.east = positions,
                        Conference::West => out.west = positions,
                    }
                }
            }
            _ => {}
        }
    }
    out
}

/// Row order is the rank. Rows without a team link don't count.
fn table_positions(table: ElementRef) -> PositionMap {
    let body_row_sel = Selector::parse("tbody tr").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let rows: Vec<ElementRef> = {
        let with_body: Vec<ElementRef> = table.select(&body_row_sel).collect();
        if with_body.is_empty() {
            table.select(&row_sel).collect()
        } else {
            with_body
        }
    };

    let mut positions = PositionMap::new();
    let mut rank = 1u32;
    for tr in rows {
        let Some(link) = tr.select(&link_sel).next() else {
            continue;
        };
        let Some(abbr) = team_from_link(&link) else {
            continue;
        };
        positions.insert(abbr, rank);
        rank += 1;
    }
    positions
}

/// `/teams/BRK/2026.html` → `BKN`; otherwise match the link text by
/// normalized name key.
fn team_from_link(link: &ElementRef) -> Option<String> {
    if let Some(href) = link.value().attr("href") {
        let parts: Vec<&str> = href.trim_matches('/').split('/').collect();
        if parts.len() >= 2 && parts[0] == "teams" && !parts[1].is_empty() {
            return Some(canonical_abbr(parts[1]));
        }
    }
    let text = link.text().collect::<String>();
    abbr_for_name(text.trim()).map(str::to_string)
}
