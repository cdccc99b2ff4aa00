//! NBA Standings Live — Core
//!
//! Vše co nepotřebuje síť: extrakce řádků z ESPN stromu, rozdělení na
//! konference, ranking + trend proti včerejšku, snapshot soubor a
//! formátování zprávy pro Telegram.

pub mod extract;
pub mod format;
pub mod partition;
pub mod rank;
pub mod snapshot;
pub mod teams;
pub mod types;

pub use extract::{gather_nodes, ConferenceNode, EntryNode};
pub use partition::{partition, SplitStandings};
pub use rank::{rank_with_trend, sort_by_standing, BaselinePositions, PositionMap};
pub use snapshot::{Snapshot, SnapshotStore};
pub use types::{Conference, ConferenceGroup, RankedRow, TeamRecord};
