//! tasl CLI
//!
//! Manage slide topics stored as wrapper/topic file pairs.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tasl_cli::cli::Command;
use tasl_cli::{Cli, TaslConfig, commands, logging};
use tasl_core::LogReporter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `config` subcommands must work even when the config file is broken
    let config = match &cli.command {
        Command::Config { .. } => TaslConfig::default(),
        _ => TaslConfig::load(cli.config.as_deref()).context("Failed to load configuration")?,
    };

    logging::init(cli.log_level, &config.log_level);
    tracing::debug!(?config, "Configuration loaded");

    commands::run(cli.command, cli.config.as_deref(), &config, &LogReporter)?;
    Ok(())
}
