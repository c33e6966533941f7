//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "simtemp", version, about = "Simulated temperature sensor service")]
pub struct Cli {
    /// Path to config TOML; built-in defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit readings and errors as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the sensor service and print every new reading
    Run {
        /// Stop after this many milliseconds (default: run until Ctrl-C)
        #[arg(long, value_name = "MS")]
        duration_ms: Option<u64>,
        /// Override sensor.sampling_ms from the config
        #[arg(long, value_name = "MS", allow_negative_numbers = true)]
        sampling_ms: Option<i32>,
        /// Override sensor.threshold_mC from the config
        #[arg(long, value_name = "MILLI_C", allow_negative_numbers = true)]
        threshold_mc: Option<i32>,
    },
    /// Start the service, wait for one in-range reading, and shut down
    SelfCheck,
}
