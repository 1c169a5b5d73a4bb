//! Text rendering of read-model states.
//!
//! Every page renders from a [`QueryState`]: a failed read-model becomes a
//! single error banner, while the non-fatal `errors[]` of a successful
//! payload are listed as warning banners above the content.

mod broker;
mod cluster;
mod namespaces;
mod topic;
mod topics;

use std::fmt::Write;

use crate::actions::{Notification, Severity};
use crate::models::{
    BrokerDetail, ClusterSnapshot, NamespacesResponse, TimeSeriesSet, TopicDetail, TopicsList,
};
use crate::read_model::QueryState;

pub use broker::render_broker;
pub use cluster::render_cluster;
pub use namespaces::render_namespaces;
pub use topic::{render_series, render_topic};
pub use topics::render_topics;

/// Payloads that carry non-fatal per-resource warnings.
pub trait Warnings {
    fn warnings(&self) -> &[String];
}

macro_rules! impl_warnings {
    ($($ty:ty),* $(,)?) => {
        $(impl Warnings for $ty {
            fn warnings(&self) -> &[String] {
                &self.errors
            }
        })*
    };
}

impl_warnings!(
    ClusterSnapshot,
    BrokerDetail,
    TopicsList,
    TopicDetail,
    NamespacesResponse,
    TimeSeriesSet,
);

/// Renders a read-model state, delegating the success case to `render`.
pub fn render_state<T, F>(state: &QueryState<T>, render: F) -> String
where
    T: Warnings,
    F: FnOnce(&T) -> String,
{
    match state {
        QueryState::Idle => "Nothing selected\n".to_string(),
        QueryState::Loading => "Loading...\n".to_string(),
        QueryState::Error(message) => error_banner(message),
        QueryState::Success(data) => {
            let mut out = warning_banners(data.warnings());
            out.push_str(&render(data));
            out
        }
    }
}

pub fn error_banner(message: &str) -> String {
    format!("[error] {}\n", message)
}

pub fn warning_banners(warnings: &[String]) -> String {
    warnings.iter().fold(String::new(), |mut out, w| {
        let _ = writeln!(out, "[warning] {}", w);
        out
    })
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        Severity::Success => "ok",
        Severity::Error => "error",
    };
    format!("[{}] {}\n", tag, notification.message)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.len()));
}

fn kv(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<28} {}", key, value);
}

#[cfg(test)]
mod view_test;
