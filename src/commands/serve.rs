use anyhow::Result;
use tracing::info;

use crate::{cli::ServeArgs, dashboard::{self, Dashboard}, network::load_network};

pub fn run(_cli: &crate::cli::Cli, args: &ServeArgs) -> Result<()> {
    let config = args.data.to_config();
    let network = load_network(&args.data.geometry, &args.data.scores, &config)?;
    let dashboard = Dashboard::new(network, config);

    info!(bind = %args.bind, "[serve] starting dashboard");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dashboard::serve(dashboard, args.bind))
}
