use std::fmt::Write;

use crate::models::TopicsList;

pub fn render_topics(list: &TopicsList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Topics ({})", list.timestamp);
    let _ = writeln!(
        out,
        "{:<40} {:<22} {:<12} {:>9} {:>13} {:>9}",
        "TOPIC", "BROKER", "DELIVERY", "PRODUCERS", "SUBSCRIPTIONS", "CONSUMERS"
    );
    for row in &list.rows {
        let _ = writeln!(
            out,
            "{:<40} {:<22} {:<12} {:>9} {:>13} {:>9}",
            row.name,
            row.broker_id,
            row.delivery.to_string(),
            row.producers,
            row.subscriptions,
            row.consumers
        );
    }
    if list.rows.is_empty() {
        let _ = writeln!(out, "(no topics)");
    }
    out
}
