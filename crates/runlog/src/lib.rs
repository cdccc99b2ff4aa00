//! NBA Standings Live — Run log
//! JSONL event stream, jeden soubor na den.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        fs::create_dir_all(&dir).ok();
        Self { log_dir: dir }
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let date  = Utc::now().format("%Y-%m-%d").to_string();
        let path  = self.log_dir.join(format!("{date}.jsonl"));
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event typy ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug)]
pub struct FetchEvent {
    pub ts:        String,
    pub event:     &'static str,   // "STANDINGS_FETCH"
    pub source:    String,         // "espn-json" | "espn-html"
    pub east_rows: usize,
    pub west_rows: usize,
}

#[derive(Serialize, Debug)]
pub struct BaselineEvent {
    pub ts:             String,
    pub event:          &'static str,   // "BASELINE"
    pub strategy:       String,         // "snapshot" | "bbr"
    pub east_positions: usize,
    pub west_positions: usize,
}

#[derive(Serialize, Debug)]
pub struct DispatchEvent {
    pub ts:          String,
    pub event:       &'static str,   // "DISPATCH"
    pub ok:          bool,
    pub dry_run:     bool,
    pub message_len: usize,
}

#[derive(Serialize, Debug)]
pub struct RunSummaryEvent {
    pub ts:         String,
    pub event:      &'static str,   // "RUN_SUMMARY"
    pub date:       String,
    pub east_rows:  usize,
    pub west_rows:  usize,
    pub dispatched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn events_append_as_jsonl() {
        let dir = env::temp_dir().join(format!("runlog_test_{}", std::process::id()));
        let logger = EventLogger::new(&dir);
        logger
            .log(&FetchEvent {
                ts: now_iso(),
                event: "STANDINGS_FETCH",
                source: "espn-json".into(),
                east_rows: 15,
                west_rows: 15,
            })
            .unwrap();

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let raw = fs::read_to_string(dir.join(format!("{date}.jsonl"))).unwrap();
        let line = raw.lines().last().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["event"], "STANDINGS_FETCH");
        assert_eq!(parsed["east_rows"], 15);
        fs::remove_dir_all(&dir).ok();
    }
}
