//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Geolookup - IP and domain geolocation lookups
#[derive(Parser)]
#[command(name = "geolookup")]
#[command(version)]
#[command(about = "IP and domain geolocation lookup service", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Print the recent lookup history
    History,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}
