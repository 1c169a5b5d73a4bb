//! Action dispatchers: administrative commands with their dialog lifecycle.
//!
//! A dispatcher owns one [`DialogState`] per dialog plus the draft form
//! behind it. Submitting builds a tagged JSON command, POSTs it and records a
//! [`Notification`]. Only a successful command closes its dialog and
//! invalidates read-model keys.

mod cluster_actions;
mod payloads;
mod topic_actions;

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::core::GatewayClient;
use crate::models::ActionResponse;
use crate::read_model::{QueryCache, QueryKey};

pub use cluster_actions::{
    ActivateForm, ClusterActions, UnloadBrokerForm, DEFAULT_ACTIVATE_REASON, DEFAULT_UNLOAD_TIMEOUT,
};
pub use payloads::{qualify, ClusterActionRequest, DispatchStrategy, SchemaType, TopicActionRequest};
pub use topic_actions::{CreateTopicForm, TopicActions, TopicTarget};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState<P> {
    Closed,
    Open(P),
}

impl<P> Default for DialogState<P> {
    fn default() -> Self {
        DialogState::Closed
    }
}

impl<P> DialogState<P> {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open(_))
    }

    pub fn params(&self) -> Option<&P> {
        match self {
            DialogState::Open(p) => Some(p),
            DialogState::Closed => None,
        }
    }

    pub fn params_mut(&mut self) -> Option<&mut P> {
        match self {
            DialogState::Open(p) => Some(p),
            DialogState::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient feedback for the last submitted action.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

impl Notification {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            expires_at: Instant::now() + NOTIFICATION_TTL,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Draft input that cannot be turned into a command.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("{field} must be a non-negative integer, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("the {0} dialog is not open")]
    DialogClosed(&'static str),
}

/// Splits a comma separated filter, trimming entries and dropping empty ones.
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Optional list field: absent unless at least one entry survives [`split_csv`].
pub fn csv_field(input: &str) -> Option<Vec<String>> {
    Some(split_csv(input)).filter(|v| !v.is_empty())
}

/// Optional numeric field: blank means absent, anything else must parse.
pub fn parse_number<T: FromStr>(field: &'static str, input: &str) -> Result<Option<T>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<T>()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: input.to_string(),
        })
}

/// Optional text field: blank means absent.
pub fn text_field(input: &str) -> Option<String> {
    Some(input.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Transport, feedback and invalidation shared by every dispatcher.
struct Dispatch {
    client: GatewayClient,
    cache: QueryCache,
    /// own list key first, then whatever the caller asked for
    invalidate: Vec<QueryKey>,
    notification: Option<Notification>,
}

impl Dispatch {
    fn new(client: GatewayClient, cache: QueryCache, own: QueryKey, extra: Vec<QueryKey>) -> Self {
        let mut invalidate = Vec::with_capacity(extra.len() + 1);
        invalidate.push(own);
        invalidate.extend(extra);
        Self {
            client,
            cache,
            invalidate,
            notification: None,
        }
    }

    /// POSTs `body` and records the outcome. Returns whether the gateway
    /// accepted the command; caches are only invalidated when it did.
    async fn send<B: Serialize>(
        &mut self,
        path: &str,
        action: &str,
        body: &B,
        success_default: &str,
        failure_default: &str,
    ) -> bool {
        let (accepted, notification) = match self.client.post::<B, ActionResponse>(path, body).await {
            Ok(resp) if resp.success => {
                info!(target: "console", "{} accepted: {}", action, resp.message);
                (true, Notification::success(or_default(&resp.message, success_default)))
            }
            Ok(resp) => {
                warn!(target: "console", "{} rejected: {}", action, resp.message);
                (false, Notification::error(or_default(&resp.message, failure_default)))
            }
            Err(e) => {
                warn!(target: "console", "{} failed: {}", action, e);
                (false, Notification::error(or_default(&e.message(), failure_default)))
            }
        };

        if accepted {
            self.cache.invalidate_all(&self.invalidate);
        }
        self.notification = Some(notification);
        accepted
    }

    fn reject(&mut self, err: FormError) {
        warn!(target: "console", "form rejected: {}", err);
        self.notification = Some(Notification::error(err.to_string()));
    }

    fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired())
    }

    fn dismiss(&mut self) {
        self.notification = None;
    }
}

fn or_default(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod actions_test;
