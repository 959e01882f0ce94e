//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// reskin demo - switch skins across a handful of simulated screens
#[derive(Parser, Debug)]
#[command(name = "reskin-demo")]
#[command(version)]
#[command(about = "Switch skins across a handful of simulated screens", long_about = None)]
pub struct Args {
    /// Preferences file (active skin, night mode)
    #[arg(long, default_value = "reskin-prefs.toml")]
    pub prefs: PathBuf,

    /// Skinning config file (feature toggles, extra skins directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the final screen report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (equivalent to RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List available skins
    List,
    /// Load a skin by name; no name restores the default skin
    Load { name: Option<String> },
    /// Toggle night mode
    Night,
}
