//! pipmem CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pipmem::cmd;
use pipmem::{Cli, Commands, OpContext};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = OpContext::new();

    match cli.command {
        Commands::Install {
            pkgs,
            upgrade,
            venv,
        } => cmd::install::install(&ctx, &pkgs, upgrade, venv.as_deref()),
        Commands::Uninstall { pkgs, venv } => {
            cmd::uninstall::uninstall(&ctx, &pkgs, venv.as_deref())
        }
        Commands::History { info, undo, limit } => match (info, undo) {
            (Some(id), _) => cmd::history::info(&ctx, id),
            (None, Some(id)) => cmd::history::undo(&ctx, id),
            (None, None) => cmd::history::list(&ctx, limit),
        },
    }
}
