//! ESPN standings client.
//!
//! Primární zdroj: JSON standings API (dvě kandidátní URL). Fallback:
//! scraping HTML tabulky na espn.com, když JSON nic nevrátí. Síťové chyby
//! a ne-200 odpovědi = "žádná data", nikdy panic.

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use standings_core::teams::{abbr_for_name, canonical_abbr};
use standings_core::{sort_by_standing, SplitStandings, TeamRecord};

const CANDIDATE_URLS: &[&str] = &[
    "https://site.web.api.espn.com/apis/v2/sports/basketball/nba/standings?region=us&lang=en&contentorigin=espn",
    "https://site.api.espn.com/apis/v2/sports/basketball/nba/standings?region=us&lang=en",
];
const FALLBACK_PAGE_URL: &str = "https://www.espn.com/nba/standings";

/// Bounded retries with a fixed delay between attempts.
const MAX_ATTEMPTS: usize = 4;
const RETRY_DELAY_MS: u64 = 700;

// Anti-bot ochrana na espn.com — vydáváme se za prohlížeč
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct EspnClient {
    client: reqwest::Client,
}

impl Default for EspnClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EspnClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(30))
                .gzip(true)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// GET with retries on timeout/connect errors, 429 and 5xx.
    /// Other non-200 statuses fail immediately (retrying a 404 is pointless).
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response> {
        let mut last_err: Option<anyhow::Error> = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.client.get(url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return Ok(resp);
                    }
                    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        warn!("GET {} -> {} (attempt {}/{})", url, status, attempt, MAX_ATTEMPTS);
                        last_err = Some(anyhow::anyhow!("HTTP {} for {}", status, url));
                    } else {
                        anyhow::bail!("HTTP {} for {}", status, url);
                    }
                }
                Err(e) => {
                    warn!("GET {} failed (attempt {}/{}): {}", url, attempt, MAX_ATTEMPTS, e);
                    last_err = Some(e.into());
                }
            }
            if attempt < MAX_ATTEMPTS {
                sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("GET {} exhausted retries", url)))
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        Ok(self.get_with_retry(url).await?.json().await?)
    }

    /// Raw standings tree from the first candidate URL that answers with a
    /// non-empty object. Empty object when all fail.
    pub async fn fetch_standings_json(&self) -> Value {
        for url in CANDIDATE_URLS {
            match self.get_json(url).await {
                Ok(v) if v.as_object().is_some_and(|o| !o.is_empty()) => {
                    debug!("standings JSON from {}", url);
                    return v;
                }
                Ok(_) => debug!("empty payload from {}", url),
                Err(e) => warn!("standings fetch failed from {}: {}", url, e),
            }
        }
        Value::Object(Default::default())
    }

    /// HTML fallback variant: scrape the standings page tables.
    pub async fn fetch_standings_html(&self) -> Result<SplitStandings> {
        let html = self.get_with_retry(FALLBACK_PAGE_URL).await?.text().await?;
        Ok(parse_standings_page(&html))
    }
}

/// Parse the standings page: every table whose header row carries W, L and
/// PCT columns is a conference table. Page order is East first. A single
/// league-wide table of 30+ rows splits positionally 15/15.
pub fn parse_standings_page(html: &str) -> SplitStandings {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();

    let mut groups: Vec<Vec<TeamRecord>> = Vec::new();
    for table in doc.select(&table_sel) {
        if let Some(rows) = parse_standings_table(table) {
            if !rows.is_empty() {
                groups.push(rows);
            }
        }
    }

    if groups.len() == 1 && groups[0].len() >= 30 {
        let mut all = groups.pop().unwrap_or_default();
        sort_by_standing(&mut all);
        all.truncate(30);
        let west = all.split_off(15);
        return SplitStandings { east: all, west };
    }

    let mut iter = groups.into_iter();
    let east = iter.next().unwrap_or_default();
    let west = iter.next().unwrap_or_default();
    SplitStandings { east, west }
}

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// One table → rows, `None` when the header has no W/L/PCT columns.
fn parse_standings_table(table: ElementRef) -> Option<Vec<TeamRecord>> {
    let header_sel = Selector::parse("th").unwrap();
    let row_sel = Selector::parse("tbody tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let headers: Vec<String> = table
        .select(&header_sel)
        .map(|h| cell_text(h).to_uppercase())
        .collect();
    let col = |label: &str| headers.iter().position(|h| h == label);
    let (w_col, l_col, pct_col) = (col("W")?, col("L")?, col("PCT")?);

    let mut rows = Vec::new();
    for tr in table.select(&row_sel) {
        let cells: Vec<String> = tr.select(&cell_sel).map(cell_text).collect();
        if cells.len() <= w_col.max(l_col).max(pct_col) {
            continue;
        }
        let name = cells[0].clone();
        if name.is_empty() {
            continue;
        }
        let wins: u32 = cells[w_col].parse().unwrap_or(0);
        let losses: u32 = cells[l_col].parse().unwrap_or(0);
        let pct: Option<f64> = cells[pct_col].parse().ok();
        let abbr = abbr_for_name(&name)
            .map(str::to_string)
            .unwrap_or_else(|| canonical_abbr(&name));
        rows.push(TeamRecord::new(name, abbr, wins, losses, pct));
    }
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, u32, u32, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(name, w, l, pct)| {
                format!("<tr><td>{name}</td><td>{w}</td><td>{l}</td><td>{pct}</td></tr>")
            })
            .collect();
        format!(
            "<table><thead><tr><th>Team</th><th>W</th><th>L</th><th>PCT</th></tr></thead>\
             <tbody>{body}</tbody></table>"
        )
    }

    #[test]
    fn two_tables_become_east_and_west() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            table(&[("Boston Celtics", 10, 2, ".833"), ("New York Knicks", 8, 4, ".667")]),
            table(&[("Denver Nuggets", 9, 3, ".750")]),
        );
        let split = parse_standings_page(&html);
        assert_eq!(split.east.len(), 2);
        assert_eq!(split.east[0].abbr, "BOS");
        assert!((split.east[0].pct - 0.833).abs() < 1e-9);
        assert_eq!(split.west[0].abbr, "DEN");
    }

    #[test]
    fn tables_without_standings_headers_are_skipped() {
        let html = format!(
            "<html><body>\
             <table><thead><tr><th>Player</th><th>PTS</th></tr></thead>\
             <tbody><tr><td>Someone</td><td>30</td></tr></tbody></table>\
             {}</body></html>",
            table(&[("Miami Heat", 6, 6, ".500")]),
        );
        let split = parse_standings_page(&html);
        assert_eq!(split.east.len(), 1);
        assert_eq!(split.east[0].abbr, "MIA");
        assert!(split.west.is_empty());
    }

    #[test]
    fn single_league_table_splits_positionally() {
        let rows: Vec<(String, u32, u32, String)> = (0..30)
            .map(|i| {
                (
                    format!("Team {i:02}"),
                    60 - i,
                    22 + i,
                    format!(".{:03}", 900 - i * 10),
                )
            })
            .collect();
        let refs: Vec<(&str, u32, u32, &str)> = rows
            .iter()
            .map(|(n, w, l, p)| (n.as_str(), *w, *l, p.as_str()))
            .collect();
        let split = parse_standings_page(&table(&refs));
        assert_eq!(split.east.len(), 15);
        assert_eq!(split.west.len(), 15);
        assert_eq!(split.east[0].display_name, "Team 00");
        assert_eq!(split.west[0].display_name, "Team 15");
    }

    #[test]
    fn unparseable_pct_derives_from_record() {
        let html = table(&[("Utah Jazz", 3, 9, "—")]);
        let split = parse_standings_page(&html);
        assert_eq!(split.east[0].abbr, "UTA");
        assert!((split.east[0].pct - 0.25).abs() < 1e-9);
    }
}
