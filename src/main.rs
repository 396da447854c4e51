//! Relink - rewrite knowledge-base exports so old article links become
//! internal cross-references.

mod cli;
mod config;
mod core;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RelinkConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = RelinkConfig::load(&cli)?;

    match &cli.command {
        Commands::Fix { args } => cli::fix::run_fix(&config, args),
        Commands::Check { args } => cli::check::run_check(&config, args),
    }
}
