use std::fmt::Write;

use crate::models::namespaces::topic_path;
use crate::models::NamespacesResponse;

pub fn render_namespaces(resp: &NamespacesResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Namespaces ({})", resp.timestamp);
    if resp.namespaces.is_empty() {
        let _ = writeln!(out, "(no namespaces)");
    }

    for ns in &resp.namespaces {
        let normal = ns.normal_topics();
        let partitioned = ns.partitioned_topics();
        let _ = writeln!(
            out,
            "\n{} ({} topics, {} partitions)",
            ns.name,
            normal.len(),
            partitioned.len()
        );

        let _ = writeln!(out, "  Topics:");
        if normal.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        for t in normal {
            let _ = writeln!(out, "    {}", topic_path(t));
        }

        if !partitioned.is_empty() {
            let _ = writeln!(out, "  Partitions:");
            for t in partitioned {
                let _ = writeln!(out, "    {}", topic_path(t));
            }
        }

        let _ = writeln!(out, "  Policies:");
        match ns.policy_entries() {
            Ok(entries) if entries.is_empty() => {
                let _ = writeln!(out, "    (none)");
            }
            Ok(entries) => {
                for e in entries {
                    if e.key.is_empty() {
                        let _ = writeln!(out, "    {}", e.value);
                    } else {
                        let _ = writeln!(out, "    {}: {}", e.key, e.value);
                    }
                }
            }
            Err(field_error) => {
                let _ = writeln!(out, "    <{}>", field_error);
            }
        }
    }
    out
}
