//! Conference partitioner: East/West split with a degradation chain.

use tracing::warn;

use crate::extract::{entry_to_record, ConferenceNode};
use crate::rank::sort_by_standing;
use crate::types::{Conference, TeamRecord};

/// Current rows split by conference, unranked.
#[derive(Debug, Default, Clone)]
pub struct SplitStandings {
    pub east: Vec<TeamRecord>,
    pub west: Vec<TeamRecord>,
}

impl SplitStandings {
    pub fn is_complete(&self) -> bool {
        !self.east.is_empty() && !self.west.is_empty()
    }
}

/// "east"/"west" substring match, case-insensitive.
fn conference_of(name: &str) -> Option<Conference> {
    let lower = name.to_lowercase();
    if lower.contains("east") {
        Some(Conference::East)
    } else if lower.contains("west") {
        Some(Conference::West)
    } else {
        None
    }
}

fn records_of(node: &ConferenceNode) -> Vec<TeamRecord> {
    node.entries.iter().filter_map(entry_to_record).collect()
}

/// Split the gathered nodes into the two conferences.
///
/// Fallback chain, stop once both sides are filled:
///   1. node's own name contains east/west — last match per side wins,
///      same as the upstream bot behaved;
///   2. nearest named ancestor (entries nested under `children`) — division
///      nodes of one conference aggregate;
///   3. per-entry group tag;
///   4. >= 30 entries total: sort by the ranking key and split 15/15,
///      first 15 to East.
///
/// Steps 2 and 3 only ever fill a side that was still empty when the step
/// began — a side resolved earlier must not collect duplicates.
///
/// Nothing resolvable → both sides empty; reported, never fatal.
pub fn partition(nodes: &[ConferenceNode]) -> SplitStandings {
    let mut split = SplitStandings::default();

    for node in nodes {
        if let Some(conf) = node.name.as_deref().and_then(conference_of) {
            assign(&mut split, conf, records_of(node));
        }
    }

    if !split.is_complete() {
        let open = open_sides(&split);
        for node in nodes {
            if let Some(conf) = node.parent_name.as_deref().and_then(conference_of) {
                if open(conf) {
                    side_mut(&mut split, conf).extend(records_of(node));
                }
            }
        }
    }

    if !split.is_complete() {
        let open = open_sides(&split);
        for node in nodes {
            for entry in &node.entries {
                if let Some(conf) = entry.group_tag().as_deref().and_then(conference_of) {
                    if !open(conf) {
                        continue;
                    }
                    if let Some(record) = entry_to_record(entry) {
                        side_mut(&mut split, conf).push(record);
                    }
                }
            }
        }
    }

    if !split.is_complete() {
        let mut all: Vec<TeamRecord> = nodes
            .iter()
            .flat_map(|n| n.entries.iter().filter_map(entry_to_record))
            .collect();
        if all.len() >= 30 {
            warn!(
                "no conference names resolved, positional 15/15 split over {} entries",
                all.len()
            );
            sort_by_standing(&mut all);
            all.truncate(30);
            let west = all.split_off(15);
            split = SplitStandings { east: all, west };
        }
    }

    if split.east.is_empty() && split.west.is_empty() {
        warn!("conference split failed — no usable standings nodes");
    }
    split
}

/// Emptiness of each side snapshotted before a fallback step runs, so the
/// step cannot append to a side it (or an earlier step) already filled.
fn open_sides(split: &SplitStandings) -> impl Fn(Conference) -> bool {
    let east_open = split.east.is_empty();
    let west_open = split.west.is_empty();
    move |conf| match conf {
        Conference::East => east_open,
        Conference::West => west_open,
    }
}

fn side_mut(split: &mut SplitStandings, conf: Conference) -> &mut Vec<TeamRecord> {
    match conf {
        Conference::East => &mut split.east,
        Conference::West => &mut split.west,
    }
}

fn assign(split: &mut SplitStandings, conf: Conference, records: Vec<TeamRecord>) {
    if records.is_empty() {
        return;
    }
    match conf {
        Conference::East => split.east = records,
        Conference::West => split.west = records,
    }
}
