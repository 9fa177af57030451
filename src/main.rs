//! nowplaying - prints the state of a media player once per tick.
//!
//! stdout carries only status lines (or blank lines when the player goes
//! away); diagnostics go to stderr.

use std::{error::Error, io, process, sync::Arc};

use clap::{CommandFactory, Parser, error::ErrorKind};
use nowplaying::{
    cli::{Cli, formatting::format_error},
    monitor::{Emitter, PollCoordinator},
    services::{
        player::{MetadataFetcher, PlayerDiscovery, Playerctl},
        process::SystemRunner,
    },
    tracing_config,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            println!("{}", e.render());
            process::exit(1);
        }
    };

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            println!("{}", Cli::command().render_usage());
            process::exit(1);
        }
    };

    tracing_config::init(cli.log_level, cli.log_format)?;
    info!(?config, "starting nowplaying");

    let playerctl = Playerctl::new(Arc::new(SystemRunner::new()), config.command_timeout);
    let emitter = Emitter::new(
        io::stdout(),
        config.format,
        config.emit_mode,
        config.target.is_all(),
    );

    let coordinator = PollCoordinator::new(
        &config,
        PlayerDiscovery::new(playerctl.clone()),
        MetadataFetcher::new(playerctl),
        emitter,
    );

    if let Err(e) = coordinator.run(shutdown_signal()).await {
        eprintln!("{}", format_error(&e.to_string()));
        process::exit(1);
    }

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
