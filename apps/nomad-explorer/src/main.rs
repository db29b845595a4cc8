//! # NOMAD Material Explorer
//!
//! The main binary for looking up materials on NOMAD.
//!
//! This application provides:
//! - One-shot lookups from the command line
//! - An interactive session reading one material per line
//! - An HTTP server with the explorer page and a JSON endpoint
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 apps/nomad-explorer (THE BINARY)             │
//! │                                                              │
//! │  ┌─────────────┐   ┌─────────────┐   ┌──────────────────┐    │
//! │  │   CLI       │   │  Web page   │   │  NOMAD client    │    │
//! │  │  (clap)     │   │  (axum)     │   │  (reqwest)       │    │
//! │  └──────┬──────┘   └──────┬──────┘   └────────┬─────────┘    │
//! │         │                 │                   │              │
//! │         └─────────────────┼───────────────────┘              │
//! │                           ▼                                  │
//! │                   ┌───────────────┐                          │
//! │                   │  nomad-core   │                          │
//! │                   │ (THE LOGIC)   │                          │
//! │                   └───────────────┘                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # One lookup
//! nomad-explorer lookup CrTe2
//!
//! # Interactive session (default)
//! nomad-explorer
//!
//! # Serve the explorer page
//! nomad-explorer server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use nomad_explorer::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing on stderr; NOMAD_LOG_FORMAT=json switches to JSON lines.
    let log_format = std::env::var("NOMAD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "nomad_explorer=debug,nomad_core=debug,tower_http=debug"
    } else {
        "nomad_explorer=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner to stderr, keeping stdout for reports.
fn print_banner() {
    eprintln!(
        r#"
  ███╗   ██╗ ██████╗ ███╗   ███╗ █████╗ ██████╗
  ████╗  ██║██╔═══██╗████╗ ████║██╔══██╗██╔══██╗
  ██╔██╗ ██║██║   ██║██╔████╔██║███████║██║  ██║
  ██║╚██╗██║██║   ██║██║╚██╔╝██║██╔══██║██║  ██║
  ██║ ╚████║╚██████╔╝██║ ╚═╝ ██║██║  ██║██████╔╝
  ╚═╝  ╚═══╝ ╚═════╝ ╚═╝     ╚═╝╚═╝  ╚═╝╚═════╝

  Material Explorer v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
