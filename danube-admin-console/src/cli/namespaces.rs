use anyhow::Result;
use clap::Args;

use danube_admin_console::view::render_namespaces;

use super::{show, GlobalArgs, ShowArgs};

#[derive(Debug, Args)]
pub struct Namespaces {
    #[command(flatten)]
    show: ShowArgs,
}

pub async fn handle(namespaces: Namespaces, global: &GlobalArgs) -> Result<()> {
    let models = global.read_models()?;
    show(models.namespaces(), &namespaces.show, "namespaces", render_namespaces).await
}
