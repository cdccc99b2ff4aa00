//! Row extractor: typed walk over the raw ESPN standings tree.
//!
//! ESPN mění tvar payloadu podle endpointu (standings na root úrovni,
//! pod `children`, pod `children[].children`…). Místo hádání přesné cesty
//! projdeme celý strom a sebereme každý uzel, který vlastní neprázdné
//! `standings.entries`. Entry samotné parsujeme přes serde do tolerantních
//! struktur — chybějící pole jsou default, ne chyba.

use serde::Deserialize;
use serde_json::Value;

use crate::teams;
use crate::types::TeamRecord;

/// A node in the upstream tree that owns a standings entries list.
#[derive(Debug, Clone)]
pub struct ConferenceNode {
    /// The node's own name ("Eastern Conference", "NBA", division name, …)
    pub name: Option<String>,
    /// Nearest named ancestor — covers entries nested under `children`
    pub parent_name: Option<String>,
    pub entries: Vec<EntryNode>,
}

/// One team entry. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntryNode {
    pub team: Option<TeamNode>,
    pub stats: Vec<StatNode>,
    /// Some payload shapes tag each entry with its group/conference
    pub group: Option<Value>,
}

impl EntryNode {
    /// Conference tag attached to the entry itself, if any shape carried one.
    pub fn group_tag(&self) -> Option<String> {
        match self.group.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(obj) => obj
                .get("name")
                .or_else(|| obj.get("shortName"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamNode {
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub short_display_name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatNode {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub short_display_name: Option<String>,
    pub value: Option<f64>,
    pub display_value: Option<String>,
}

impl StatNode {
    /// First matching key alias wins — mirrors how ESPN labels stats.
    fn key(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.abbreviation.as_deref())
            .or(self.short_display_name.as_deref())
    }

    fn as_f64(&self) -> Option<f64> {
        self.value
            .or_else(|| self.display_value.as_deref().and_then(|v| v.parse().ok()))
    }
}

/// Depth-first walk collecting every standings-owning node in the document.
pub fn gather_nodes(root: &Value) -> Vec<ConferenceNode> {
    let mut out = Vec::new();
    walk(root, None, &mut out);
    out
}

fn node_name(obj: &serde_json::Map<String, Value>) -> Option<String> {
    for key in ["name", "shortName", "abbreviation"] {
        if let Some(s) = obj.get(key).and_then(Value::as_str) {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

fn walk(node: &Value, parent_name: Option<&str>, out: &mut Vec<ConferenceNode>) {
    match node {
        Value::Object(obj) => {
            let name = node_name(obj);
            if let Some(entries) = obj
                .get("standings")
                .and_then(|st| st.get("entries"))
                .and_then(Value::as_array)
            {
                if !entries.is_empty() {
                    let parsed: Vec<EntryNode> = entries
                        .iter()
                        .filter_map(|e| serde_json::from_value(e.clone()).ok())
                        .collect();
                    if !parsed.is_empty() {
                        out.push(ConferenceNode {
                            name: name.clone(),
                            parent_name: parent_name.map(str::to_string),
                            entries: parsed,
                        });
                    }
                }
            }
            let next_parent = name.as_deref().or(parent_name);
            for v in obj.values() {
                walk(v, next_parent, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                walk(v, parent_name, out);
            }
        }
        _ => {}
    }
}

/// Entry → normalized record. `None` when there is no team object at all
/// (spurious entries are skipped, not errored).
pub fn entry_to_record(entry: &EntryNode) -> Option<TeamRecord> {
    let team = entry.team.as_ref()?;
    let display = team
        .display_name
        .as_deref()
        .or(team.name.as_deref())
        .unwrap_or("")
        .to_string();
    let raw_abbr = team
        .abbreviation
        .as_deref()
        .or(team.short_display_name.as_deref())
        .unwrap_or(&display);
    let abbr = teams::canonical_abbr(raw_abbr);

    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut pct: Option<f64> = None;
    for stat in &entry.stats {
        match stat.key() {
            Some("wins") => wins = stat.as_f64().unwrap_or(0.0).max(0.0) as u32,
            Some("losses") => losses = stat.as_f64().unwrap_or(0.0).max(0.0) as u32,
            Some("winPercent") => {
                if pct.is_none() {
                    pct = stat.as_f64();
                }
            }
            _ => {}
        }
    }
    Some(TeamRecord::new(display, abbr, wins, losses, pct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(abbr: &str, name: &str, w: u32, l: u32) -> Value {
        json!({
            "team": { "displayName": name, "abbreviation": abbr },
            "stats": [
                { "name": "wins", "value": w },
                { "name": "losses", "value": l },
                { "name": "winPercent", "value": (w as f64) / ((w + l) as f64) },
            ]
        })
    }

    #[test]
    fn gathers_nodes_at_any_depth() {
        let doc = json!({
            "uid": "s:40",
            "children": [
                {
                    "name": "Eastern Conference",
                    "standings": { "entries": [entry("BOS", "Boston Celtics", 10, 2)] }
                },
                {
                    "name": "Western Conference",
                    "children": [
                        {
                            "name": "Northwest Division",
                            "standings": { "entries": [entry("DEN", "Denver Nuggets", 9, 3)] }
                        }
                    ]
                }
            ]
        });
        let nodes = gather_nodes(&doc);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name.as_deref(), Some("Eastern Conference"));
        assert_eq!(nodes[1].name.as_deref(), Some("Northwest Division"));
        assert_eq!(nodes[1].parent_name.as_deref(), Some("Western Conference"));
    }

    #[test]
    fn empty_entries_are_ignored() {
        let doc = json!({ "standings": { "entries": [] } });
        assert!(gather_nodes(&doc).is_empty());
    }

    #[test]
    fn entry_without_team_is_skipped() {
        let e: EntryNode =
            serde_json::from_value(json!({ "stats": [{ "name": "wins", "value": 5 }] })).unwrap();
        assert!(entry_to_record(&e).is_none());
    }

    #[test]
    fn record_fields_normalize() {
        let e: EntryNode = serde_json::from_value(entry("no", "New Orleans Pelicans", 7, 5)).unwrap();
        let r = entry_to_record(&e).unwrap();
        assert_eq!(r.abbr, "NOP");
        assert_eq!(r.wins, 7);
        assert_eq!(r.losses, 5);
        assert!((r.pct - 7.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn missing_stats_default_to_zero() {
        let e: EntryNode = serde_json::from_value(json!({
            "team": { "displayName": "Utah Jazz", "abbreviation": "UTA" },
            "stats": []
        }))
        .unwrap();
        let r = entry_to_record(&e).unwrap();
        assert_eq!((r.wins, r.losses), (0, 0));
        assert_eq!(r.pct, 0.0);
    }

    #[test]
    fn pct_falls_back_to_display_value() {
        let e: EntryNode = serde_json::from_value(json!({
            "team": { "displayName": "Miami Heat", "abbreviation": "MIA" },
            "stats": [
                { "name": "wins", "value": 6 },
                { "name": "losses", "value": 6 },
                { "name": "winPercent", "displayValue": "0.500" },
            ]
        }))
        .unwrap();
        let r = entry_to_record(&e).unwrap();
        assert!((r.pct - 0.5).abs() < 1e-9);
    }
}
