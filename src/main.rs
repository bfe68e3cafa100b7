//! Pagewire - a live-update client for development content servers.

mod cli;
mod client;
mod config;
mod core;
mod host;
mod logger;
mod protocol;
mod render;
mod resource;
mod script;
mod theme;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ClientConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    logger::set_verbose(cli.verbose);

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(ClientConfig::load(cli)?);

    match &cli.command {
        Commands::Connect => cli::connect::run_connect(&config),
        Commands::Frame { frame } => cli::frame::run_frame(frame.as_deref(), &config),
    }
}
