//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers. Every page or
//! API request is an independent submission.

use super::{
    AppState, page,
    types::{ErrorResponse, HealthResponse, LookupParams, LookupResponse},
};
use crate::lookup::{run_lookup, submit};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use nomad_core::LookupOutcome;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PAGE HANDLER
// =============================================================================

/// The explorer page. Without `material` it shows only the input form.
pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> impl IntoResponse {
    let raw = params.material.unwrap_or_default();
    let submitted = submit(&state.client, &raw).await;
    Html(page::render_page(raw.trim(), &submitted.report()))
}

// =============================================================================
// LOOKUP HANDLER
// =============================================================================

/// JSON lookup. Errored outcomes answer 502 since the failure was upstream.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Response {
    let raw = params.material.unwrap_or_default();
    let query = match nomad_core::Query::new(&raw) {
        Ok(q) => q,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Invalid material: {}", e))),
            )
                .into_response();
        }
    };

    let material = query.to_string();
    let outcome = run_lookup(&state.client, query).await;
    let status = match outcome {
        LookupOutcome::Errored { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    (status, Json(LookupResponse::new(material, outcome))).into_response()
}
