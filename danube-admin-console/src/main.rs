mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "danube-admin-console")]
#[command(about = "Danube Admin Console - inspect and operate a Danube cluster through the admin gateway", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: cli::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Cluster overview: brokers, roles, topic totals
    #[command(display_order = 1)]
    Cluster(cli::cluster::Cluster),

    /// Inspect brokers, unload or activate them
    #[command(display_order = 2)]
    Brokers(cli::brokers::Brokers),

    /// List, inspect, create, move and delete topics
    #[command(display_order = 3)]
    Topics(cli::topics::Topics),

    /// Namespaces with their topics and policies
    #[command(display_order = 4)]
    Namespaces(cli::namespaces::Namespaces),

    /// Check the gateway and cluster leader reachability
    #[command(display_order = 5)]
    Health,

    /// Local console preferences (theme, navigation)
    #[command(display_order = 6)]
    Prefs(cli::prefs::Prefs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered views and --output json stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cluster(cmd) => cli::cluster::handle(cmd, &cli.global).await,
        Commands::Brokers(cmd) => cli::brokers::handle(cmd, &cli.global).await,
        Commands::Topics(cmd) => cli::topics::handle(cmd, &cli.global).await,
        Commands::Namespaces(cmd) => cli::namespaces::handle(cmd, &cli.global).await,
        Commands::Health => cli::cluster::health(&cli.global).await,
        Commands::Prefs(cmd) => cli::prefs::handle(cmd, &cli.global).await,
    }
}
