use anyhow::Result;
use clap::{Args, Subcommand};

use danube_admin_console::actions::{
    ClusterActions, UnloadBrokerForm, DEFAULT_ACTIVATE_REASON, DEFAULT_UNLOAD_TIMEOUT,
};
use danube_admin_console::read_model::broker_key;
use danube_admin_console::view::{render_broker, render_cluster};

use super::{report, show, GlobalArgs, ShowArgs};

#[derive(Debug, Args)]
pub struct Brokers {
    #[command(subcommand)]
    command: BrokersCommands,
}

#[derive(Debug, Subcommand)]
enum BrokersCommands {
    #[command(
        about = "Show broker details, metrics and hosted topics",
        after_help = "Examples:
  danube-admin-console brokers show 10285063371164059634
  danube-admin-console brokers show 10285063371164059634 --watch"
    )]
    Show {
        broker_id: String,
        #[command(flatten)]
        show: ShowArgs,
    },
    #[command(
        about = "Unload a broker by migrating all hosted topics off it",
        after_help = "Examples:
  danube-admin-console brokers unload 10285063371164059634 --dry-run
  danube-admin-console brokers unload 10285063371164059634 --max-parallel 5 --namespaces-include default,tenant-a"
    )]
    Unload {
        broker_id: String,
        #[arg(long, default_value = "", help = "Max topics to unload in parallel")]
        max_parallel: String,
        #[arg(long, default_value = "", help = "Comma separated namespaces to include")]
        namespaces_include: String,
        #[arg(long, default_value = "", help = "Comma separated namespaces to exclude")]
        namespaces_exclude: String,
        #[arg(long, default_value_t = false, help = "Only list topics that would be unloaded")]
        dry_run: bool,
        #[arg(long, default_value = DEFAULT_UNLOAD_TIMEOUT, help = "Per-topic timeout seconds (blank to omit)")]
        timeout_seconds: String,
        #[arg(long, default_value_t = false, help = "Render the refreshed cluster view afterwards")]
        show: bool,
    },
    #[command(
        about = "Activate a broker (set state to active)",
        after_help = "Examples:
  danube-admin-console brokers activate 10285063371164059634
  danube-admin-console brokers activate 10285063371164059634 --reason 'maintenance complete'"
    )]
    Activate {
        broker_id: String,
        #[arg(long, default_value = DEFAULT_ACTIVATE_REASON, help = "Reason for auditability")]
        reason: String,
        #[arg(long, default_value_t = false, help = "Render the refreshed cluster view afterwards")]
        show: bool,
    },
}

pub async fn handle(brokers: Brokers, global: &GlobalArgs) -> Result<()> {
    let models = global.read_models()?;

    match brokers.command {
        BrokersCommands::Show { broker_id, show: args } => {
            show(models.broker(Some(&broker_id)), &args, "broker", render_broker).await
        }
        BrokersCommands::Unload {
            broker_id,
            max_parallel,
            namespaces_include,
            namespaces_exclude,
            dry_run,
            timeout_seconds,
            show,
        } => {
            let mut cluster = show.then(|| models.cluster());
            if let Some(model) = cluster.as_mut() {
                model.settled().await;
            }

            let mut actions = ClusterActions::with_invalidate_keys(
                models.client().clone(),
                models.cache().clone(),
                vec![broker_key(&broker_id)],
            );
            actions.open_unload_with(UnloadBrokerForm {
                broker_id,
                max_parallel,
                namespaces_include,
                namespaces_exclude,
                dry_run,
                timeout_seconds,
            });
            let accepted = actions.submit_unload().await;
            report(actions.notification(), accepted, cluster, render_cluster).await
        }
        BrokersCommands::Activate {
            broker_id,
            reason,
            show,
        } => {
            let mut cluster = show.then(|| models.cluster());
            if let Some(model) = cluster.as_mut() {
                model.settled().await;
            }

            let mut actions = ClusterActions::with_invalidate_keys(
                models.client().clone(),
                models.cache().clone(),
                vec![broker_key(&broker_id)],
            );
            actions.open_activate(broker_id);
            if let Some(form) = actions.activate_form_mut() {
                form.reason = reason;
            }
            let accepted = actions.submit_activate().await;
            report(actions.notification(), accepted, cluster, render_cluster).await
        }
    }
}
