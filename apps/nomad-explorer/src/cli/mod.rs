//! # CLI Module
//!
//! This module implements the CLI interface for the explorer.
//!
//! ## Available Commands
//!
//! - `lookup` - Look up one material and print the result
//! - `interactive` - Read materials from stdin, one lookup per line (default)
//! - `server` - Serve the explorer page over HTTP

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use nomad_core::NomadError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// NOMAD Material Explorer
///
/// Fetches metadata and the band gap of a material from the NOMAD database.
#[derive(Parser, Debug)]
#[command(name = "nomad-explorer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// NOMAD API root (overrides config and NOMAD_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides config and NOMAD_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up one material formula or element symbol
    Lookup {
        /// Material formula or element symbol (e.g. Li, Mg, CrTe2)
        material: String,
    },

    /// Read one material per line from stdin until EOF, "quit" or "exit"
    Interactive,

    /// Start HTTP server
    Server {
        /// Host to bind to (default from config, then 127.0.0.1)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (default from config, then 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Resolve the effective configuration: file, environment, then flags.
    pub fn resolve_config(&self) -> Result<Config, NomadError> {
        let mut config = Config::load(self.config.as_deref())?;
        config.apply_env();

        if let Some(url) = &self.base_url {
            config.nomad.base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.nomad.timeout_secs = Some(secs);
        }
        if let Some(Commands::Server { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
        config.normalize();
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), NomadError> {
    let config = cli.resolve_config()?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Lookup { material }) => cmd_lookup(&config, &material, json_mode).await,
        Some(Commands::Server { .. }) => cmd_server(&config).await,
        Some(Commands::Interactive) | None => cmd_interactive(&config, json_mode).await,
    }
}
