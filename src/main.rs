use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use walkability::cli::{Cli, Commands};
use walkability::commands::{render, serve};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve(args) => serve::run(&cli, args),
        Commands::Render(args) => render::run(&cli, args),
    }
}

/// `RUST_LOG` wins; otherwise -v raises the level from info.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
