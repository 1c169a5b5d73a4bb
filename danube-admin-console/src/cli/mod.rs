pub mod brokers;
pub mod cluster;
pub mod namespaces;
pub mod prefs;
pub mod topics;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use danube_admin_console::core::config::DEFAULT_GATEWAY_URL;
use danube_admin_console::core::{GatewayClient, GatewayClientConfig};
use danube_admin_console::read_model::{QueryCache, QueryState, ReadModel, ReadModels};
use danube_admin_console::actions::Notification;
use danube_admin_console::view::{render_notification, render_state, Warnings};

/// Connection and storage settings shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Admin gateway base URL (scheme optional)
    #[arg(long, global = true, env = "DANUBE_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    pub gateway_url: String,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, env = "DANUBE_GATEWAY_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Preferences file (default: $XDG_CONFIG_HOME/danube-admin-console/preferences.json)
    #[arg(long, global = true, env = "DANUBE_CONSOLE_PREFS")]
    pub prefs_path: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn client(&self) -> Result<GatewayClient> {
        let config = GatewayClientConfig {
            base_url: self.gateway_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        };
        GatewayClient::new(config).context("invalid gateway configuration")
    }

    /// Read-models over one cache for the lifetime of the command.
    pub fn read_models(&self) -> Result<ReadModels> {
        Ok(ReadModels::new(self.client()?, QueryCache::new()))
    }
}

/// `--watch` / `--output` flags of the read commands.
#[derive(Debug, Args, Clone, Default)]
pub struct ShowArgs {
    /// Keep polling and re-render on every change until Ctrl-C
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Output format: json (default: text)
    #[arg(long, value_parser = ["json"])]
    output: Option<String>,
}

impl ShowArgs {
    fn json(&self) -> bool {
        matches!(self.output.as_deref(), Some("json"))
    }
}

/// Renders a mounted read-model once it settles, or on every change with `--watch`.
pub async fn show<T, F>(mut model: ReadModel<T>, args: &ShowArgs, what: &str, render: F) -> Result<()>
where
    T: Warnings + Serialize,
    F: Fn(&T) -> String,
{
    let state = model.settled().await;
    print_state(&state, args, &render)?;

    if !args.watch {
        if let QueryState::Error(message) = state {
            bail!("{} unavailable: {}", what, message);
        }
        return Ok(());
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            next = model.changed() => match next {
                Some(state) => print_state(&state, args, &render)?,
                None => return Ok(()),
            },
        }
    }
}

fn print_state<T, F>(state: &QueryState<T>, args: &ShowArgs, render: &F) -> Result<()>
where
    T: Warnings + Serialize,
    F: Fn(&T) -> String,
{
    match state.data() {
        Some(data) if args.json() => println!("{}", serde_json::to_string_pretty(data.as_ref())?),
        _ => print!("{}", render_state(state, |data| render(data))),
    }
    if args.watch {
        println!();
    }
    Ok(())
}

/// Prints the outcome of an action. When a read-model was mounted before
/// submitting, waits for the refetch the success triggered and renders it.
pub async fn report<T, F>(
    notification: Option<&Notification>,
    accepted: bool,
    model: Option<ReadModel<T>>,
    render: F,
) -> Result<()>
where
    T: Warnings,
    F: Fn(&T) -> String,
{
    if let Some(notification) = notification {
        print!("{}", render_notification(notification));
    }
    if !accepted {
        let message = notification.map(|n| n.message.as_str()).unwrap_or("action failed");
        bail!("{}", message);
    }

    if let Some(mut model) = model {
        let state = match model.changed().await {
            Some(state) => state,
            None => model.state(),
        };
        print!("{}", render_state(&state, |data| render(data)));
    }
    Ok(())
}
