//! # API Request/Response Types
//!
//! This module defines the query string and JSON structures of the web surface.

use nomad_core::{LookupOutcome, Report};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// LOOKUP REQUEST/RESPONSE
// =============================================================================

/// Query string of `/` and `/api/lookup`: `?material=<formula>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupParams {
    pub material: Option<String>,
}

/// Result of one lookup, as returned by `/api/lookup` and `lookup --json-mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// The query as sent upstream (trimmed).
    pub material: String,
    pub outcome: LookupOutcome,
    pub report: Report,
}

impl LookupResponse {
    pub fn new(material: impl Into<String>, outcome: LookupOutcome) -> Self {
        let report = Report::from_outcome(&outcome);
        Self {
            material: material.into(),
            outcome,
            report,
        }
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
