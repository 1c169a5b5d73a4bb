use std::fmt::Write;

use super::{kv, section};
use crate::models::BrokerDetail;

pub fn render_broker(detail: &BrokerDetail) -> String {
    let mut out = String::new();
    let b = &detail.broker;
    let _ = writeln!(out, "Broker {} ({})", b.broker_id, detail.timestamp);
    kv(&mut out, "Address", &b.broker_addr);
    kv(&mut out, "Role", b.role());
    kv(&mut out, "Status", b.status());

    let m = &detail.metrics;
    section(&mut out, "Metrics");
    kv(&mut out, "RPC total", m.rpc_total);
    kv(&mut out, "RPC rate (1m)", format!("{:.2}", m.rpc_rate_1m));
    kv(&mut out, "Topics owned", m.topics_owned);
    kv(&mut out, "Producers connected", m.producers_connected);
    kv(&mut out, "Consumers connected", m.consumers_connected);
    kv(&mut out, "Inbound bytes", m.inbound_bytes_total);
    kv(&mut out, "Outbound bytes", m.outbound_bytes_total);
    kv(&mut out, "5xx errors", m.errors_5xx_total);

    section(&mut out, "Topics");
    let _ = writeln!(
        out,
        "{:<40} {:<12} {:>9} {:>9} {:>13}",
        "TOPIC", "DELIVERY", "PRODUCERS", "CONSUMERS", "SUBSCRIPTIONS"
    );
    for t in &detail.topics {
        let _ = writeln!(
            out,
            "{:<40} {:<12} {:>9} {:>9} {:>13}",
            t.name,
            t.delivery.to_string(),
            t.producers_connected,
            t.consumers_connected,
            t.subscriptions
        );
    }
    if detail.topics.is_empty() {
        let _ = writeln!(out, "(no topics)");
    }
    out
}
