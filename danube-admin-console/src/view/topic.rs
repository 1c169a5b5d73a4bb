use std::fmt::Write;

use chrono::DateTime;

use super::{kv, section};
use crate::models::series::{BYTES_IN_RATE, BYTES_OUT_RATE, DISPATCH_RATE, PRODUCER_SEND_ERRORS, PUBLISH_RATE};
use crate::models::{AlignedSeries, TimeSeriesSet, TopicDetail};

pub fn render_topic(detail: &TopicDetail) -> String {
    let mut out = String::new();
    let topic = &detail.topic;
    let _ = writeln!(out, "Topic {} ({})", topic.name, detail.timestamp);

    let m = &detail.metrics;
    section(&mut out, "Overview");
    kv(&mut out, "Messages in", m.core.msg_in_total);
    kv(&mut out, "Messages out", m.core.msg_out_total);
    kv(&mut out, "Bytes in", m.core.bytes_in_total);
    kv(&mut out, "Bytes out", m.core.bytes_out_total);
    kv(&mut out, "Producers", m.active.producers);
    kv(&mut out, "Consumers", m.active.consumers);
    kv(&mut out, "Subscriptions", m.active.subscriptions);
    kv(&mut out, "Send errors", m.quality.send_error_total);
    kv(&mut out, "Avg msg size (B)", format!("{:.2}", m.latency_size.msg_size_bytes_avg));
    kv(&mut out, "Latency p95 (ms)", format!("{:.3}", m.latency_size.send_latency_ms_p95));

    section(&mut out, "Rates & latency");
    kv(&mut out, "Publish rate (1m)", format!("{:.2}", m.rates.publish_rate_1m));
    kv(&mut out, "Dispatch rate (1m)", format!("{:.2}", m.rates.dispatch_rate_1m));
    kv(&mut out, "Send ok", m.quality.send_ok_total);
    kv(&mut out, "Latency p50 (ms)", format!("{:.3}", m.latency_size.send_latency_ms_p50));
    kv(&mut out, "Latency p99 (ms)", format!("{:.3}", m.latency_size.send_latency_ms_p99));
    for (code, count) in &m.quality.send_error_by_code {
        kv(&mut out, &format!("Send errors [{}]", code), count);
    }

    if let Some(r) = &m.reliable {
        section(&mut out, "Reliable delivery");
        kv(&mut out, "WAL appends", r.wal_append_total);
        kv(&mut out, "WAL append bytes", r.wal_append_bytes_total);
        kv(&mut out, "WAL fsync total", r.wal_fsync_total);
        kv(&mut out, "Cloud upload bytes", r.cloud_upload_bytes_total);
        kv(&mut out, "Cloud upload objects", r.cloud_upload_objects_total);
        kv(&mut out, "WAL flush p50 (ms)", format!("{:.3}", r.wal_flush_latency_ms_p50));
        kv(&mut out, "WAL flush p95 (ms)", format!("{:.3}", r.wal_flush_latency_ms_p95));
        kv(&mut out, "WAL flush p99 (ms)", format!("{:.3}", r.wal_flush_latency_ms_p99));
    }

    section(&mut out, "Schema");
    kv(&mut out, "Type", &topic.type_schema);
    match topic.decoded_schema() {
        Ok(schema) if schema.is_empty() => kv(&mut out, "Data", "-"),
        Ok(schema) => {
            let _ = writeln!(out, "{}", indent(&schema));
        }
        Err(field_error) => kv(&mut out, "Data", format!("<{}>", field_error)),
    }

    section(&mut out, "Subscriptions");
    if topic.subscriptions.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for sub in &topic.subscriptions {
        let _ = writeln!(out, "  {}", sub);
    }
    out
}

/// Chart pairs side by side, then the per error code send failures.
pub fn render_series(set: &TimeSeriesSet) -> String {
    let mut out = String::new();
    pair(
        &mut out,
        "Publish vs Dispatch rate (1m)",
        (PUBLISH_RATE, DISPATCH_RATE),
        &set.align(PUBLISH_RATE, DISPATCH_RATE),
    );
    pair(
        &mut out,
        "Bytes In/Out rate (1m)",
        (BYTES_IN_RATE, BYTES_OUT_RATE),
        &set.align(BYTES_IN_RATE, BYTES_OUT_RATE),
    );

    let errors: Vec<_> = set.all(PRODUCER_SEND_ERRORS).collect();
    if !errors.is_empty() {
        section(&mut out, "Producer send errors");
        for s in errors {
            let mut labels: Vec<String> = s
                .labels
                .iter()
                .flatten()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            labels.sort();
            let last = s.points.last().map(|(_, v)| *v).unwrap_or_default();
            let _ = writeln!(out, "  {{{}}} latest {:.2}", labels.join(","), last);
        }
    }
    out
}

fn pair(out: &mut String, title: &str, names: (&str, &str), aligned: &AlignedSeries) {
    section(out, title);
    if aligned.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let _ = writeln!(out, "  {:<10} {:>18} {:>18}", "TIME", names.0, names.1);
    for i in 0..aligned.len() {
        let _ = writeln!(
            out,
            "  {:<10} {:>18} {:>18}",
            clock(aligned.timestamps[i]),
            cell(aligned.left[i]),
            cell(aligned.right[i])
        );
    }
}

fn clock(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("  {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}
