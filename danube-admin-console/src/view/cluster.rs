use std::fmt::Write;

use super::{kv, section};
use crate::models::ClusterSnapshot;

pub fn render_cluster(snapshot: &ClusterSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cluster overview ({})", snapshot.timestamp);

    section(&mut out, "Totals");
    kv(&mut out, "Brokers", snapshot.totals.broker_count);
    kv(&mut out, "Topics", snapshot.totals.topics_total);
    kv(&mut out, "RPC total", snapshot.totals.rpc_total);
    kv(&mut out, "Active connections", snapshot.totals.active_connections);

    section(&mut out, "Brokers");
    let _ = writeln!(
        out,
        "{:<22} {:<24} {:<10} {:<10} {:>7} {:>10} {:>9} {:>7} {:>6}",
        "BROKER ID", "ADDRESS", "ROLE", "STATUS", "TOPICS", "RPC", "RPC/1M", "CONNS", "5XX"
    );
    for b in &snapshot.brokers {
        let _ = writeln!(
            out,
            "{:<22} {:<24} {:<10} {:<10} {:>7} {:>10} {:>9.2} {:>7} {:>6}",
            b.broker_id,
            b.broker_addr,
            b.role().to_string(),
            b.status().to_string(),
            b.stats.topics_owned,
            b.stats.rpc_total,
            b.stats.rpc_rate_1m,
            b.stats.active_connections,
            b.stats.errors_5xx_total
        );
    }
    if snapshot.brokers.is_empty() {
        let _ = writeln!(out, "(no brokers)");
    }
    out
}
