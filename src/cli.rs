//! CLI definitions for Plugboard.

use std::path::PathBuf;

use clap::Parser;

use plugboard_core::DEFAULT_SECTION;

/// Plugboard host.
#[derive(Debug, Parser)]
#[command(name = "plugboard")]
#[command(about = "Run an application assembled from deployment-time modules")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PLUGBOARD_CONFIG")]
    pub file: Option<PathBuf>,

    /// Configuration section holding name mappings and module lists
    #[arg(short, long, default_value = DEFAULT_SECTION)]
    pub section: String,

    /// Log filter, overriding RUST_LOG (e.g. "debug", "plugboard_core=trace")
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write logs to daily rotated files in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Registered name of the application to run
    pub application: String,

    /// Arguments passed to the application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
