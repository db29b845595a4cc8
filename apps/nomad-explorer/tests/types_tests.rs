//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use nomad_core::{Entry, LookupOutcome, MissReason};
use nomad_explorer::api::{ErrorResponse, HealthResponse, LookupParams, LookupResponse};
use serde_json::json;

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.3.1".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.3.1\""));
}

// =============================================================================
// LOOKUP PARAMS TESTS
// =============================================================================

#[test]
fn test_lookup_params_optional_material() {
    let params: LookupParams = serde_json::from_str("{}").unwrap();
    assert!(params.material.is_none());

    let params: LookupParams = serde_json::from_str(r#"{"material":"Mg"}"#).unwrap();
    assert_eq!(params.material.as_deref(), Some("Mg"));
}

// =============================================================================
// LOOKUP RESPONSE TESTS
// =============================================================================

#[test]
fn test_lookup_response_found_shape() {
    let entry: Entry = serde_json::from_value(json!({
        "entry_id": "E1",
        "formula": "Li",
        "atoms": {"n_atoms": 1, "elements": ["Li"]}
    }))
    .unwrap();
    let response = LookupResponse::new(
        "Li",
        LookupOutcome::Found {
            entry,
            band_gap: None,
        },
    );

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["material"], "Li");
    assert_eq!(value["outcome"]["status"], "found");
    assert_eq!(value["report"]["title"], "NOMAD Material Explorer");
    assert_eq!(value["report"]["body"]["kind"], "entry");

    let fields = value["report"]["body"]["content"]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0]["label"], "Formula");
    assert_eq!(fields[2]["value"], "N/A");
    assert_eq!(
        value["report"]["body"]["content"]["band_gap"]["kind"],
        "unavailable"
    );
}

#[test]
fn test_lookup_response_roundtrip_not_found() {
    let response = LookupResponse::new(
        "Og",
        LookupOutcome::NotFound {
            reason: MissReason::NoMatches,
        },
    );

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"kind\":\"no_matches\""));
    let back: LookupResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_error_response_serialization() {
    let json = serde_json::to_string(&ErrorResponse::new("Invalid material")).unwrap();
    assert_eq!(json, r#"{"error":"Invalid material"}"#);
}
