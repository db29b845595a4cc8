//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, LookupResponse};
use crate::client::NomadClient;
use crate::config::Config;
use crate::lookup::{Submitted, run_lookup, submit};
use nomad_core::{NomadError, Query, Report};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Build the HTTP client from the resolved configuration.
pub fn build_client(config: &Config) -> Result<NomadClient, NomadError> {
    NomadClient::new(
        &config.nomad.base_url,
        config.nomad.timeout(),
        &config.nomad.user_agent,
    )
    .map_err(|e| NomadError::ConfigError(e.to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, NomadError> {
    serde_json::to_string_pretty(value).map_err(|e| NomadError::SerializationError(e.to_string()))
}

// =============================================================================
// LOOKUP COMMAND
// =============================================================================

/// Look up one material and print the report.
pub async fn cmd_lookup(config: &Config, material: &str, json_mode: bool) -> Result<(), NomadError> {
    let query = Query::new(material)?;
    let client = build_client(config)?;

    let label = query.to_string();
    let outcome = run_lookup(&client, query).await;

    if json_mode {
        println!("{}", to_json(&LookupResponse::new(label, outcome))?);
    } else {
        print!("{}", Report::from_outcome(&outcome).to_text());
    }
    Ok(())
}

// =============================================================================
// INTERACTIVE COMMAND
// =============================================================================

/// Words that end an interactive session.
const EXIT_WORDS: [&str; 2] = ["quit", "exit"];

fn prompt() -> Result<(), NomadError> {
    print!("\n{} ", nomad_core::primitives::INPUT_LABEL);
    std::io::stdout()
        .flush()
        .map_err(|e| NomadError::IoError(format!("Cannot write prompt: {}", e)))
}

/// Read one material per line from stdin and print a report for each.
///
/// Blank lines are skipped. EOF, `quit` or `exit` end the session.
pub async fn cmd_interactive(config: &Config, json_mode: bool) -> Result<(), NomadError> {
    let client = build_client(config)?;

    if !json_mode {
        print!("{}", Report::idle().to_text());
        prompt()?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| NomadError::IoError(format!("Cannot read stdin: {}", e)))?
    {
        let input = line.trim();
        if EXIT_WORDS.iter().any(|w| input.eq_ignore_ascii_case(w)) {
            break;
        }

        let submitted = submit(&client, input).await;
        if json_mode {
            if let Submitted::Completed(outcome) = submitted {
                match to_json(&LookupResponse::new(input, outcome)) {
                    Ok(json) => println!("{}", json),
                    Err(e) => tracing::error!(material = %input, error = %e, "cannot print lookup"),
                }
            }
        } else {
            print!("{}", submitted.report().body_text());
            prompt()?;
        }
    }

    if !json_mode {
        println!();
    }
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), NomadError> {
    let client = build_client(config)?;
    let addr = config.server.addr();

    println!("NOMAD Material Explorer Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Upstream: {}", client.base_url());
    match config.nomad.timeout_secs {
        Some(secs) => println!("  Timeout:  {}s", secs),
        None => println!("  Timeout:  transport default"),
    }
    println!();
    println!("Endpoints:");
    println!("  GET /                    - Explorer page");
    println!("  GET /api/lookup?material - Lookup as JSON");
    println!("  GET /health              - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&addr, client).await
}
