//! goltime library root.
//! Exposes the CLI parser, the high-level run() function and the session
//! controller used by the interactive board.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;

/// Path of the configuration file: `--config` or `~/.goltime.yml`.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file)
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli) -> AppResult<()> {
    let path = config_path(cli);

    // `init` is the only command that works without a configuration
    if let Commands::Init { force } = &cli.command {
        return cli::commands::init::handle(&path, *force);
    }

    let cfg = Config::load_from(&path)?;

    match &cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, &cfg, &path),
        Commands::Run { .. } => cli::commands::run::handle(cli, &cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, &cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, &cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    dispatch(&cli)
}
