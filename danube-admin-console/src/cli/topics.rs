use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use danube_admin_console::actions::{CreateTopicForm, DispatchStrategy, SchemaType, TopicActions};
use danube_admin_console::models::series::DEFAULT_STEP;
use danube_admin_console::models::SeriesRange;
use danube_admin_console::read_model::{broker_key, QueryKey, QueryState};
use danube_admin_console::view::{render_series, render_state, render_topic, render_topics};

use super::{report, show, GlobalArgs, ShowArgs};

#[derive(Debug, Args)]
pub struct Topics {
    #[command(subcommand)]
    command: TopicsCommands,
}

#[derive(Debug, Subcommand)]
enum TopicsCommands {
    #[command(about = "List topics across all brokers")]
    List {
        #[command(flatten)]
        show: ShowArgs,
    },
    #[command(
        about = "Show topic metrics, schema and subscriptions",
        after_help = "Examples:
  danube-admin-console topics show /default/orders
  danube-admin-console topics show /default/orders --output json"
    )]
    Show {
        topic: String,
        #[command(flatten)]
        show: ShowArgs,
    },
    #[command(
        about = "Show rate and error time series for a topic",
        after_help = "Examples:
  danube-admin-console topics series /default/orders
  danube-admin-console topics series /default/orders --minutes 60 --step 1m
  danube-admin-console topics series /default/orders --from 1735689600 --to 1735693200"
    )]
    Series {
        topic: String,
        #[arg(long, default_value_t = 15, help = "Window ending now, in minutes")]
        minutes: u64,
        #[arg(long, help = "Range start (unix seconds); overrides --minutes")]
        from: Option<i64>,
        #[arg(long, help = "Range end (unix seconds, default now)")]
        to: Option<i64>,
        #[arg(long, default_value = DEFAULT_STEP, help = "Resolution, e.g. 15s, 1m")]
        step: String,
        #[arg(long, default_value_t = false, help = "Slide the window forward every step until Ctrl-C")]
        watch: bool,
    },
    #[command(
        about = "Create a topic",
        after_help = "Examples:
  danube-admin-console topics create /default/orders
  danube-admin-console topics create orders --namespace billing --schema-type Json --dispatch-strategy reliable
  danube-admin-console topics create /default/events --partitions 3"
    )]
    Create {
        /// '/namespace/topic', or a bare name together with --namespace
        topic: String,
        #[arg(long, default_value = "")]
        namespace: String,
        #[arg(long, default_value = "", help = "Number of partitions (blank for a non-partitioned topic)")]
        partitions: String,
        #[arg(long, default_value = "String", help = "String, Bytes, Int64 or Json")]
        schema_type: SchemaType,
        #[arg(long, default_value = "{}", help = "Schema definition (blank to omit)")]
        schema_data: String,
        #[arg(long, default_value = "non_reliable", help = "non_reliable or reliable")]
        dispatch_strategy: DispatchStrategy,
        #[arg(long, default_value_t = false, help = "Render the refreshed topic list afterwards")]
        show: bool,
    },
    #[command(
        about = "Move a topic to another broker",
        after_help = "Examples:
  danube-admin-console topics unload /default/orders
  danube-admin-console topics unload orders --namespace default"
    )]
    Unload {
        topic: String,
        #[arg(long, default_value = "", help = "Namespace for a bare topic name")]
        namespace: String,
        #[arg(long, help = "Broker currently owning the topic, refreshed as well")]
        broker_id: Option<String>,
        #[arg(long, default_value_t = false, help = "Render the refreshed topic list afterwards")]
        show: bool,
    },
    #[command(
        about = "Permanently delete a topic",
        after_help = "Examples:
  danube-admin-console topics delete /default/orders"
    )]
    Delete {
        topic: String,
        #[arg(long, default_value = "", help = "Namespace for a bare topic name")]
        namespace: String,
        #[arg(long, help = "Broker currently owning the topic, refreshed as well")]
        broker_id: Option<String>,
        #[arg(long, default_value_t = false, help = "Render the refreshed topic list afterwards")]
        show: bool,
    },
}

pub async fn handle(topics: Topics, global: &GlobalArgs) -> Result<()> {
    let models = global.read_models()?;

    match topics.command {
        TopicsCommands::List { show: args } => {
            show(models.topics(), &args, "topics", render_topics).await
        }
        TopicsCommands::Show { topic, show: args } => {
            show(models.topic(Some(&topic)), &args, "topic", render_topic).await
        }
        TopicsCommands::Series {
            topic,
            minutes,
            from,
            to,
            step,
            watch,
        } => {
            let range = |now: i64| {
                let to = to.unwrap_or(now);
                let from = from.unwrap_or(to - (minutes as i64) * 60);
                SeriesRange::new(from, to, step.clone())
            };
            let mut query = models.series(&topic);
            query.set_range(range(chrono::Utc::now().timestamp()));
            let state = query.settled().await;
            print!("{}", render_state(&state, render_series));

            if !watch {
                if let QueryState::Error(message) = state {
                    bail!("series unavailable: {}", message);
                }
                return Ok(());
            }

            let mut ticker = tokio::time::interval(step_duration(&step));
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => return Ok(()),
                    _ = ticker.tick() => {
                        // supersedes a request that is still running
                        query.set_range(range(chrono::Utc::now().timestamp()));
                        let state = query.settled().await;
                        println!();
                        print!("{}", render_state(&state, render_series));
                    }
                }
            }
        }
        TopicsCommands::Create {
            topic,
            namespace,
            partitions,
            schema_type,
            schema_data,
            dispatch_strategy,
            show,
        } => {
            let mut list = show.then(|| models.topics());
            if let Some(model) = list.as_mut() {
                model.settled().await;
            }

            let mut actions = TopicActions::new(models.client().clone(), models.cache().clone());
            actions.open_create_with(CreateTopicForm {
                topic,
                namespace,
                partitions,
                schema_type,
                schema_data,
                dispatch_strategy,
            });
            let accepted = actions.submit_create().await;
            report(actions.notification(), accepted, list, render_topics).await
        }
        TopicsCommands::Unload {
            topic,
            namespace,
            broker_id,
            show,
        } => {
            let mut list = show.then(|| models.topics());
            if let Some(model) = list.as_mut() {
                model.settled().await;
            }

            let mut actions = topic_actions(&models, broker_id.as_deref());
            actions.open_unload(topic);
            if let Some(target) = actions.unload_target_mut() {
                target.namespace = namespace;
            }
            let accepted = actions.submit_unload().await;
            report(actions.notification(), accepted, list, render_topics).await
        }
        TopicsCommands::Delete {
            topic,
            namespace,
            broker_id,
            show,
        } => {
            let mut list = show.then(|| models.topics());
            if let Some(model) = list.as_mut() {
                model.settled().await;
            }

            let mut actions = topic_actions(&models, broker_id.as_deref());
            actions.open_delete(topic);
            if let Some(target) = actions.delete_target_mut() {
                target.namespace = namespace;
            }
            let accepted = actions.submit_delete().await;
            report(actions.notification(), accepted, list, render_topics).await
        }
    }
}

fn topic_actions(
    models: &danube_admin_console::read_model::ReadModels,
    broker_id: Option<&str>,
) -> TopicActions {
    let extra: Vec<QueryKey> = broker_id.map(broker_key).into_iter().collect();
    TopicActions::with_invalidate_keys(models.client().clone(), models.cache().clone(), extra)
}

/// Parses `15s`, `1m`, `2h`; anything else falls back to 15 seconds.
fn step_duration(step: &str) -> Duration {
    let step = step.trim();
    let secs = [("s", 1u64), ("m", 60), ("h", 3600)]
        .iter()
        .find_map(|(unit, factor)| {
            let value = step.strip_suffix(unit)?.parse::<u64>().ok()?;
            value.checked_mul(*factor)
        });
    Duration::from_secs(secs.filter(|s| *s > 0).unwrap_or(15))
}

#[cfg(test)]
mod tests {
    use super::step_duration;
    use std::time::Duration;

    #[test]
    fn test_step_strings() {
        assert_eq!(step_duration("15s"), Duration::from_secs(15));
        assert_eq!(step_duration("1m"), Duration::from_secs(60));
        assert_eq!(step_duration("2h"), Duration::from_secs(7200));
        assert_eq!(step_duration("0s"), Duration::from_secs(15));
        assert_eq!(step_duration("soon"), Duration::from_secs(15));
        assert_eq!(step_duration("5é"), Duration::from_secs(15));
        assert_eq!(step_duration(""), Duration::from_secs(15));
        assert_eq!(step_duration("18446744073709551615h"), Duration::from_secs(15));
    }
}
