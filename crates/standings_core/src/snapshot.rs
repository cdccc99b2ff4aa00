//! Snapshot store: dnešní ranky na disk, zítra se čtou jako baseline.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rank::{BaselinePositions, PositionMap};
use crate::types::RankedRow;

/// Persisted ranks of one day. Single file, fully overwritten each run —
/// only the most recent day is kept.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub east: PositionMap,
    #[serde(default)]
    pub west: PositionMap,
}

impl From<Snapshot> for BaselinePositions {
    fn from(snap: Snapshot) -> Self {
        BaselinePositions { east: snap.east, west: snap.west }
    }
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing or corrupt file degrades to an empty snapshot — a run with no
    /// trend arrows beats no run at all.
    pub fn load(&self) -> Snapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("no snapshot at {:?}, starting without baseline", self.path);
                return Snapshot::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snap) => snap,
            Err(e) => {
                warn!("corrupt snapshot at {:?} ignored: {}", self.path, e);
                Snapshot::default()
            }
        }
    }

    pub fn save(&self, date: &str, east: &[RankedRow], west: &[RankedRow]) -> Result<()> {
        let snap = Snapshot {
            date: date.to_string(),
            east: to_positions(east),
            west: to_positions(west),
        };
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).ok();
            }
        }
        let body = serde_json::to_string_pretty(&snap)?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write snapshot {:?}", self.path))?;
        Ok(())
    }
}

fn to_positions(rows: &[RankedRow]) -> PositionMap {
    rows.iter()
        .map(|r| (r.record.abbr.clone(), r.rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::rank_with_trend;
    use crate::types::TeamRecord;
    use std::env;

    fn tmp_path(tag: &str) -> PathBuf {
        env::temp_dir().join(format!("standings_snap_{tag}_{}.json", std::process::id()))
    }

    fn ranked(rows: &[(&str, u32, u32)]) -> Vec<RankedRow> {
        let records = rows
            .iter()
            .map(|(a, w, l)| TeamRecord::new(format!("Team {a}"), a.to_string(), *w, *l, None))
            .collect();
        rank_with_trend(records, &PositionMap::new())
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = tmp_path("roundtrip");
        let store = SnapshotStore::new(&path);
        let east = ranked(&[("BOS", 10, 2), ("NYK", 8, 4)]);
        let west = ranked(&[("DEN", 9, 3), ("LAL", 5, 7)]);
        store.save("2026-01-15", &east, &west).unwrap();

        let snap = store.load();
        assert_eq!(snap.date, "2026-01-15");
        assert_eq!(snap.east.get("BOS"), Some(&1));
        assert_eq!(snap.east.get("NYK"), Some(&2));
        assert_eq!(snap.west.get("DEN"), Some(&1));
        assert_eq!(snap.west.get("LAL"), Some(&2));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = SnapshotStore::new(tmp_path("missing_never_written"));
        let snap = store.load();
        assert!(snap.date.is_empty() && snap.east.is_empty() && snap.west.is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let path = tmp_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let snap = SnapshotStore::new(&path).load();
        assert!(snap.east.is_empty() && snap.west.is_empty());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn save_overwrites_previous_day() {
        let path = tmp_path("overwrite");
        let store = SnapshotStore::new(&path);
        store.save("2026-01-14", &ranked(&[("MIA", 5, 5)]), &[]).unwrap();
        store.save("2026-01-15", &ranked(&[("BOS", 6, 4)]), &[]).unwrap();
        let snap = store.load();
        assert_eq!(snap.date, "2026-01-15");
        assert!(snap.east.contains_key("BOS"));
        assert!(!snap.east.contains_key("MIA"));
        fs::remove_file(&path).ok();
    }
}
