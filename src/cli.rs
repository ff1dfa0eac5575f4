use std::path::PathBuf;

use clap::{Parser, Subcommand};

// ///////////// //
// CLI interface //
// ///////////// //

/// toner2mqtt - A service that periodically reads toner levels from printer status pages and publishes them to a MQTT server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Polls every configured printer once and prints the toner levels in Prometheus text format.
    Dump,
    /// Reads toner levels from saved status pages and prints them as JSON.
    Parse {
        /// Printer name for each file, in the same order as the files.
        #[arg(long = "name", required = true)]
        names: Vec<String>,
        /// Saved status pages.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
