//! Výběr baseline strategie: snapshot soubor vs. Basketball-Reference.

use chrono::{Duration, NaiveDate};
use tracing::info;

use bbr_client::BbrClient;
use standings_core::{BaselinePositions, SnapshotStore};

use crate::config::{BaselineStrategy, Config};

/// The two interchangeable sources of "yesterday's ranks". Both produce the
/// same `BaselinePositions`; the rank engine never knows which ran.
pub enum BaselineProvider {
    Snapshot(SnapshotStore),
    Bbr(BbrClient),
}

impl BaselineProvider {
    pub fn from_config(cfg: &Config) -> Self {
        match cfg.baseline {
            BaselineStrategy::Snapshot => {
                BaselineProvider::Snapshot(SnapshotStore::new(&cfg.snapshot_path))
            }
            BaselineStrategy::Bbr => BaselineProvider::Bbr(BbrClient::new()),
        }
    }

    pub async fn load(&self, today: NaiveDate) -> BaselinePositions {
        match self {
            BaselineProvider::Snapshot(store) => {
                let snap = store.load();
                if !snap.date.is_empty() {
                    info!("baseline from snapshot dated {}", snap.date);
                }
                snap.into()
            }
            BaselineProvider::Bbr(client) => {
                let yesterday = today - Duration::days(1);
                client.positions_for(yesterday).await
            }
        }
    }
}
