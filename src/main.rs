//! Kolam - trims and animates kolam SVG drawings.

mod cli;
mod config;
mod logger;
mod source;
mod svg;
mod viewer;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{KolamConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    cli::serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(KolamConfig::load(&cli)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match &cli.command {
        Commands::Render { src, output } => cli::render::render(src, output, &config, &runtime),
        Commands::Normalize { input, output } => {
            cli::render::normalize(input.as_ref(), output, &config)
        }
        Commands::Inspect { input, pretty } => {
            cli::inspect::inspect(input.as_ref(), *pretty, &config)
        }
        Commands::Serve { .. } => cli::serve::serve(&runtime),
    }
}
