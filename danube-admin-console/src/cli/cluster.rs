use anyhow::{bail, Result};
use clap::Args;

use danube_admin_console::view::render_cluster;

use super::{show, GlobalArgs, ShowArgs};

#[derive(Debug, Args)]
pub struct Cluster {
    #[command(flatten)]
    show: ShowArgs,
}

pub async fn handle(cluster: Cluster, global: &GlobalArgs) -> Result<()> {
    let models = global.read_models()?;
    show(models.cluster(), &cluster.show, "cluster", render_cluster).await
}

pub async fn health(global: &GlobalArgs) -> Result<()> {
    let health = global.client()?.health().await?;
    println!(
        "Gateway: {}  Leader reachable: {}",
        health.status, health.leader_reachable
    );
    if !health.leader_reachable {
        bail!("cluster leader is not reachable");
    }
    Ok(())
}
