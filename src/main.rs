/// NBA Standings Live — Daily Digest Bot
///
/// Co dělá:
///   1. Stáhne aktuální NBA standings z ESPN (JSON, fallback HTML tabulka)
///   2. Rozdělí týmy na Východ/Západ a spočítá rank v konferenci
///   3. Porovná se včerejškem (snapshot soubor nebo Basketball-Reference)
///   4. Pošle rusky lokalizovanou tabulku s trend šipkami na Telegram
///
/// Spuštění:
///   TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... cargo run --bin standings-bot
///
/// DRY_RUN=1 přeskočí odeslání, BASELINE_SOURCE=bbr čte včerejšek z BBR.

mod baseline;
mod config;
mod telegram;

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use dotenv::dotenv;
use std::env;
use std::fs::File;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use espn_client::EspnClient;
use runlog::{now_iso, BaselineEvent, DispatchEvent, EventLogger, FetchEvent, RunSummaryEvent};
use standings_core::format::build_message;
use standings_core::{gather_nodes, partition, rank_with_trend, SnapshotStore, SplitStandings};

use crate::baseline::BaselineProvider;
use crate::config::Config;

/// Publikujeme v moskevském čase (UTC+3, bez DST)
fn moscow_today() -> NaiveDate {
    let msk = FixedOffset::east_opt(3 * 3600).expect("fixed offset");
    Utc::now().with_timezone(&msk).date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("=== NBA Standings Live — daily digest run ===");

    // Single instance lock — runs are expected sequential, the snapshot
    // read-modify-write must never race a second invocation.
    let lock_file_path = env::temp_dir().join("nba_standings_live.lock");
    let lock_file = File::create(&lock_file_path)
        .with_context(|| format!("failed to create lock file at {:?}", lock_file_path))?;
    let mut lock = fd_lock::RwLock::new(lock_file);
    let _write_guard = match lock.try_write() {
        Ok(guard) => {
            info!("Acquired single-instance lock.");
            guard
        }
        Err(_) => {
            warn!("Another standings-bot run is already in progress! Exiting.");
            return Ok(());
        }
    };

    let cfg = Config::from_env()?;
    info!(
        "Baseline: {} · snapshot: {} · dry_run: {}",
        cfg.baseline.name(),
        cfg.snapshot_path,
        cfg.dry_run
    );

    let runlog = EventLogger::new(&cfg.log_dir);
    let espn = EspnClient::new();

    // ── Fetch + split ────────────────────────────────────────────────────
    let raw = espn.fetch_standings_json().await;
    let nodes = gather_nodes(&raw);
    let mut split = partition(&nodes);
    let mut source = "espn-json";
    if !split.is_complete() {
        warn!(
            "JSON standings incomplete (east={}, west={}), trying HTML fallback",
            split.east.len(),
            split.west.len()
        );
        match espn.fetch_standings_html().await {
            Ok(fallback) if fallback.is_complete() => {
                split = fallback;
                source = "espn-html";
            }
            Ok(fallback) => warn!(
                "HTML fallback also incomplete (east={}, west={})",
                fallback.east.len(),
                fallback.west.len()
            ),
            Err(e) => warn!("HTML fallback failed: {}", e),
        }
    }
    let _ = runlog.log(&FetchEvent {
        ts: now_iso(),
        event: "STANDINGS_FETCH",
        source: source.to_string(),
        east_rows: split.east.len(),
        west_rows: split.west.len(),
    });
    if split.east.is_empty() && split.west.is_empty() {
        anyhow::bail!("no standings rows from any source");
    }

    // ── Baseline + rank ──────────────────────────────────────────────────
    let today = moscow_today();
    let provider = BaselineProvider::from_config(&cfg);
    let positions = provider.load(today).await;
    if positions.is_empty() {
        warn!("no baseline positions — digest goes out without trend data");
    }
    let _ = runlog.log(&BaselineEvent {
        ts: now_iso(),
        event: "BASELINE",
        strategy: cfg.baseline.name().to_string(),
        east_positions: positions.east.len(),
        west_positions: positions.west.len(),
    });

    let SplitStandings { east, west } = split;
    let east = rank_with_trend(east, &positions.east);
    let west = rank_with_trend(west, &positions.west);

    // Today's ranks become tomorrow's baseline. A failed write only costs
    // tomorrow's arrows, not today's digest.
    let store = SnapshotStore::new(&cfg.snapshot_path);
    let date_str = today.format("%Y-%m-%d").to_string();
    if let Err(e) = store.save(&date_str, &east, &west) {
        warn!("snapshot save failed: {}", e);
    }

    // ── Format + dispatch ────────────────────────────────────────────────
    let message = build_message(today, &east, &west, cfg.play_in_band, cfg.baseline.note_ru());

    let dispatched = if cfg.dry_run {
        info!("DRY_RUN set — message below, nothing sent:\n{}", message);
        let _ = runlog.log(&DispatchEvent {
            ts: now_iso(),
            event: "DISPATCH",
            ok: true,
            dry_run: true,
            message_len: message.len(),
        });
        false
    } else {
        match (&cfg.bot_token, &cfg.chat_id) {
            (Some(token), Some(chat_id)) => {
                let client = reqwest::Client::new();
                let sent = telegram::send_message(&client, token, chat_id, &message).await;
                let _ = runlog.log(&DispatchEvent {
                    ts: now_iso(),
                    event: "DISPATCH",
                    ok: sent.is_ok(),
                    dry_run: false,
                    message_len: message.len(),
                });
                sent.context("telegram dispatch failed")?;
                info!("Digest posted ({} bytes).", message.len());
                true
            }
            _ => {
                warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set — skipping dispatch");
                false
            }
        }
    };

    let _ = runlog.log(&RunSummaryEvent {
        ts: now_iso(),
        event: "RUN_SUMMARY",
        date: date_str,
        east_rows: east.len(),
        west_rows: west.len(),
        dispatched,
    });
    info!("OK");
    Ok(())
}
