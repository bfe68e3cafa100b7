//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Pagewire live-update client CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Server address (host or host:port), overrides `[connect]` host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Page path to watch, overrides `[connect]` page
    #[arg(short, long, global = true)]
    pub page: Option<String>,

    /// Config file path (default: pagewire.toml)
    #[arg(short = 'C', long, default_value = "pagewire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Connect to the server and keep the page live
    #[command(visible_alias = "c")]
    Connect,

    /// Decode one frame and show how it would be handled
    #[command(visible_alias = "f")]
    Frame {
        /// Frame JSON; reads stdin when omitted
        frame: Option<String>,
    },
}
