//! snippet-vault - code snippet organizer
//!
//! Command-line front-end over the snippet vault library: create, tag,
//! favorite and filter snippets stored in a local JSON database.

use clap::Parser;
use std::error::Error;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use snippet_vault::config::Config;

mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    init_tracing(&config, cli.verbose);
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    cli::execute_cli(cli, &config)?;
    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
/// `-v` wins over `RUST_LOG`, which wins over the configured level.
fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
