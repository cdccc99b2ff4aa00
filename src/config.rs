//! Konfigurace z environmentu — jediné místo, kde se čtou env proměnné.

use anyhow::{bail, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineStrategy {
    /// Yesterday's ranks from our own snapshot file
    Snapshot,
    /// Yesterday's ranks scraped from Basketball-Reference
    Bbr,
}

impl BaselineStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            BaselineStrategy::Snapshot => "snapshot",
            BaselineStrategy::Bbr => "bbr",
        }
    }

    /// Zdroj pro info řádek ve zprávě
    pub fn note_ru(&self) -> &'static str {
        match self {
            BaselineStrategy::Snapshot => "локальный снапшот",
            BaselineStrategy::Bbr => "Basketball-Reference",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub baseline: BaselineStrategy,
    pub snapshot_path: String,
    /// Fetch + format, but never hit the Telegram API
    pub dry_run: bool,
    pub play_in_band: Option<(u32, u32)>,
    pub log_dir: String,
}

impl Config {
    /// Reads the whole configuration once. With STRICT_CREDS set, missing
    /// Telegram credentials are fatal here at startup; otherwise dispatch is
    /// later skipped with a warning.
    pub fn from_env() -> Result<Self> {
        let bot_token = env_nonempty("TELEGRAM_BOT_TOKEN");
        let chat_id = env_nonempty("TELEGRAM_CHAT_ID");
        if env_flag("STRICT_CREDS") && (bot_token.is_none() || chat_id.is_none()) {
            bail!("STRICT_CREDS set but TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID missing");
        }

        let baseline = match env::var("BASELINE_SOURCE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "bbr" | "basketball-reference" => BaselineStrategy::Bbr,
            _ => BaselineStrategy::Snapshot,
        };

        Ok(Self {
            bot_token,
            chat_id,
            baseline,
            snapshot_path: env_nonempty("SNAPSHOT_PATH")
                .unwrap_or_else(|| "snapshot.json".to_string()),
            dry_run: env_flag("DRY_RUN"),
            play_in_band: band_from_env(env::var("PLAYIN_BAND").ok().as_deref()),
            log_dir: env_nonempty("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Unset variable → default band 7-10. Set but empty (`PLAYIN_BAND=`) or
/// unparseable → disabled.
fn band_from_env(raw: Option<&str>) -> Option<(u32, u32)> {
    match raw {
        None => Some((7, 10)),
        Some(raw) => parse_band(raw),
    }
}

/// `"7-10"` → `Some((7, 10))`; `"off"`/garbage → `None`.
fn parse_band(raw: &str) -> Option<(u32, u32)> {
    let (from, to) = raw.trim().split_once('-')?;
    let from: u32 = from.trim().parse().ok()?;
    let to: u32 = to.trim().parse().ok()?;
    (from <= to && from >= 1).then_some((from, to))
}
