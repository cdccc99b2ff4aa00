/// Diagnostika ESPN zdroje: stáhne standings, vypíše nalezené uzly a split.
/// Nic neposílá — hodí se, když ESPN změní tvar payloadu.
///
///   cargo run --bin probe-source

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use espn_client::EspnClient;
use standings_core::{gather_nodes, partition, sort_by_standing};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let espn = EspnClient::new();
    let raw = espn.fetch_standings_json().await;
    let nodes = gather_nodes(&raw);

    println!("standings nodes: {}", nodes.len());
    for node in &nodes {
        println!(
            "  name={:?} parent={:?} entries={}",
            node.name,
            node.parent_name,
            node.entries.len()
        );
    }

    let split = partition(&nodes);
    for (label, mut rows) in [("EAST", split.east), ("WEST", split.west)] {
        sort_by_standing(&mut rows);
        println!("{label}: {} teams", rows.len());
        for r in rows.iter().take(5) {
            println!("  {} {}-{} ({:.3})", r.abbr, r.wins, r.losses, r.pct);
        }
    }
    Ok(())
}
