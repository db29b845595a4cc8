//! # Core Type Definitions
//!
//! This module contains the records exchanged with NOMAD and the error type:
//! - The validated search input (`Query`)
//! - Entry records from the search endpoint (`Entry`, `DftInfo`, `AtomsInfo`)
//! - The archive document (`Archive`) and the value read from it (`BandGap`)
//! - Why a search came back empty (`MissReason`)
//! - Error types (`NomadError`)
//!
//! ## Absence Guarantees
//!
//! Every upstream field is an `Option`. A record deserializes successfully
//! whatever subset of fields it carries; fields of an unexpected shape are
//! treated as missing (see [`crate::lenient`]).

use crate::lenient;
use crate::primitives::{BAND_GAP_POINTER, BAND_GAP_PRECISION, BAND_GAP_UNIT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// =============================================================================
// QUERY
// =============================================================================

/// A formula or element symbol submitted by the user.
///
/// Surrounding whitespace is trimmed and the result must be non-empty.
/// Nothing else is checked: the upstream decides what matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Validate and wrap raw user input.
    pub fn new(raw: &str) -> Result<Self, NomadError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NomadError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ENTRY
// =============================================================================

/// Computation method block of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DftInfo {
    #[serde(default, deserialize_with = "lenient::display_text")]
    pub code_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::display_text")]
    pub xc_functional: Option<String>,
}

/// Structure block of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomsInfo {
    #[serde(default, deserialize_with = "lenient::count")]
    pub n_atoms: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub elements: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::display_text")]
    pub structure_type: Option<String>,
}

/// One material record returned by the search endpoint.
///
/// Unknown keys are ignored. Nested blocks that are missing, `null` or not
/// objects read exactly like blocks whose fields are all missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient::display_text")]
    pub formula: Option<String>,
    #[serde(default, deserialize_with = "lenient::display_text")]
    pub entry_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::block")]
    pub dft: Option<DftInfo>,
    #[serde(default, deserialize_with = "lenient::block")]
    pub atoms: Option<AtomsInfo>,
    #[serde(default, deserialize_with = "lenient::display_text")]
    pub upload_time: Option<String>,
}

impl Entry {
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    /// The identifier used to address the archive.
    ///
    /// Blank identifiers count as missing; they cannot name an archive.
    pub fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn code_name(&self) -> Option<&str> {
        self.dft.as_ref().and_then(|d| d.code_name.as_deref())
    }

    pub fn xc_functional(&self) -> Option<&str> {
        self.dft.as_ref().and_then(|d| d.xc_functional.as_deref())
    }

    pub fn n_atoms(&self) -> Option<u64> {
        self.atoms.as_ref().and_then(|a| a.n_atoms)
    }

    /// Element labels, empty when the record has none.
    pub fn elements(&self) -> &[String] {
        self.atoms
            .as_ref()
            .and_then(|a| a.elements.as_deref())
            .unwrap_or(&[])
    }

    pub fn structure_type(&self) -> Option<&str> {
        self.atoms.as_ref().and_then(|a| a.structure_type.as_deref())
    }

    pub fn upload_time(&self) -> Option<&str> {
        self.upload_time.as_deref()
    }
}

/// Body of the search endpoint: `{ "data": [Entry, ...] }`.
///
/// Rows that are `null`, empty objects or not objects at all are kept as
/// `None`, so they still occupy their position in the list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient::rows")]
    pub data: Option<Vec<Option<Entry>>>,
}

impl SearchResponse {
    /// The first row, if it holds an entry.
    ///
    /// Only the first row is considered; a blank first row means no match
    /// even when later rows carry data.
    pub fn into_first(self) -> Option<Entry> {
        self.data
            .and_then(|rows| rows.into_iter().next())
            .flatten()
    }
}

// =============================================================================
// ARCHIVE
// =============================================================================

/// Detailed computed-properties document of one entry.
///
/// The document is arbitrary JSON and kept as-is; only the band gap is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Archive(Value);

impl Archive {
    /// The archive used when the endpoint answers with a non-200 status.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// `results.properties.electronic.band_structure_electronic.band_gap`,
    /// when present and numeric.
    pub fn band_gap(&self) -> Option<BandGap> {
        self.0
            .pointer(BAND_GAP_POINTER)
            .and_then(Value::as_f64)
            .map(BandGap::new)
    }
}

impl Default for Archive {
    fn default() -> Self {
        Self::empty()
    }
}

/// Electronic band gap in electron-volts.
///
/// Renders with exactly three decimals and the unit. Rounding is the standard
/// library's correctly rounded decimal formatting of the stored binary value,
/// ties to even.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandGap(f64);

impl BandGap {
    #[must_use]
    pub const fn new(ev: f64) -> Self {
        Self(ev)
    }

    #[must_use]
    pub const fn ev(self) -> f64 {
        self.0
    }
}

impl fmt::Display for BandGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*} {}", BAND_GAP_PRECISION, self.0, BAND_GAP_UNIT)
    }
}

// =============================================================================
// MISS REASON
// =============================================================================

/// Why the search produced no entry.
///
/// Both reasons render the same warning; the distinction is kept for logs
/// and JSON consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissReason {
    /// HTTP 200 with an empty or missing `data` list.
    NoMatches,
    /// The search endpoint answered with a non-200 status.
    UpstreamStatus { status: u16 },
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatches => write!(f, "no matching entries"),
            Self::UpstreamStatus { status } => write!(f, "search endpoint returned HTTP {status}"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the explorer.
///
/// Missing upstream fields are never errors; see the absence guarantees above.
#[derive(Debug, Error)]
pub enum NomadError {
    /// The query was empty after trimming.
    #[error("Query must not be empty")]
    EmptyQuery,

    /// A submission was driven through a transition its state does not allow.
    #[error("Invalid submission transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error (file, socket).
    #[error("I/O error: {0}")]
    IoError(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_trims_whitespace() {
        let query = Query::new("  CrTe2 \n").expect("valid query");
        assert_eq!(query.as_str(), "CrTe2");
        assert_eq!(query.to_string(), "CrTe2");
    }

    #[test]
    fn test_query_rejects_blank() {
        assert!(matches!(Query::new(""), Err(NomadError::EmptyQuery)));
        assert!(matches!(Query::new("   \t"), Err(NomadError::EmptyQuery)));
    }

    #[test]
    fn test_query_accepts_long_input() {
        let raw = "Li".repeat(200);
        let query = Query::new(&raw).expect("long query");
        assert_eq!(query.as_str().len(), 400);
    }

    #[test]
    fn test_entry_full_record() {
        let entry: Entry = serde_json::from_value(json!({
            "entry_id": "zyx123",
            "formula": "CrTe2",
            "dft": {"code_name": "VASP", "xc_functional": "GGA"},
            "atoms": {"n_atoms": 3, "elements": ["Cr", "Te"], "structure_type": "bulk"},
            "upload_time": "2021-03-04T10:00:00+00:00",
            "unrelated": {"ignored": true}
        }))
        .expect("entry should deserialize");

        assert_eq!(entry.formula(), Some("CrTe2"));
        assert_eq!(entry.entry_id(), Some("zyx123"));
        assert_eq!(entry.code_name(), Some("VASP"));
        assert_eq!(entry.xc_functional(), Some("GGA"));
        assert_eq!(entry.n_atoms(), Some(3));
        assert_eq!(entry.elements(), ["Cr".to_string(), "Te".to_string()]);
        assert_eq!(entry.structure_type(), Some("bulk"));
        assert_eq!(entry.upload_time(), Some("2021-03-04T10:00:00+00:00"));
    }

    #[test]
    fn test_entry_empty_record() {
        let entry: Entry = serde_json::from_value(json!({})).expect("empty entry");
        assert_eq!(entry, Entry::default());
        assert!(entry.elements().is_empty());
        assert_eq!(entry.n_atoms(), None);
    }

    #[test]
    fn test_entry_null_blocks() {
        let entry: Entry =
            serde_json::from_value(json!({"dft": null, "atoms": null})).expect("null blocks");
        assert_eq!(entry.code_name(), None);
        assert_eq!(entry.structure_type(), None);

        let entry: Entry =
            serde_json::from_value(json!({"atoms": "Li"})).expect("scalar block");
        assert!(entry.elements().is_empty());
    }

    #[test]
    fn test_blank_entry_id_is_missing() {
        let entry: Entry = serde_json::from_value(json!({"entry_id": "  "})).expect("entry");
        assert_eq!(entry.entry_id(), None);
    }

    #[test]
    fn test_search_response_first_entry() {
        let response: SearchResponse = serde_json::from_value(json!({
            "data": [{"entry_id": "a"}, {"entry_id": "b"}]
        }))
        .expect("search response");
        let first = response.into_first().expect("first entry");
        assert_eq!(first.entry_id(), Some("a"));
    }

    #[test]
    fn test_search_response_blank_first_row() {
        for body in [
            json!({"data": [null]}),
            json!({"data": [{}]}),
            json!({"data": [{}, {"entry_id": "b"}]}),
            json!({"data": ["Li"]}),
        ] {
            let response: SearchResponse =
                serde_json::from_value(body.clone()).expect("search response");
            assert!(response.into_first().is_none(), "{body}");
        }
    }

    #[test]
    fn test_search_response_without_rows() {
        for body in [json!({"data": []}), json!({"data": null}), json!({}), json!({"data": 7})] {
            let response: SearchResponse = serde_json::from_value(body).expect("search response");
            assert!(response.into_first().is_none());
        }
    }

    #[test]
    fn test_archive_band_gap_present() {
        let archive = Archive::from_value(json!({
            "results": {"properties": {"electronic": {
                "band_structure_electronic": {"band_gap": 1.5}
            }}}
        }));
        assert_eq!(archive.band_gap(), Some(BandGap::new(1.5)));
        assert!(!archive.is_empty());
    }

    #[test]
    fn test_archive_band_gap_absent() {
        assert_eq!(Archive::empty().band_gap(), None);
        assert!(Archive::empty().is_empty());

        let partial = Archive::from_value(json!({"results": {"properties": {}}}));
        assert_eq!(partial.band_gap(), None);

        let wrong_type = Archive::from_value(json!({
            "results": {"properties": {"electronic": {
                "band_structure_electronic": {"band_gap": "wide"}
            }}}
        }));
        assert_eq!(wrong_type.band_gap(), None);

        assert_eq!(Archive::from_value(json!([1, 2, 3])).band_gap(), None);
    }

    #[test]
    fn test_band_gap_formatting() {
        assert_eq!(BandGap::new(0.0).to_string(), "0.000 eV");
        assert_eq!(BandGap::new(1.2345).to_string(), "1.234 eV");
        assert_eq!(BandGap::new(2.0).to_string(), "2.000 eV");
        assert_eq!(BandGap::new(3.14159).to_string(), "3.142 eV");
    }

    #[test]
    fn test_miss_reason_serialization() {
        let json = serde_json::to_string(&MissReason::UpstreamStatus { status: 503 })
            .expect("serialize");
        assert_eq!(json, r#"{"kind":"upstream_status","status":503}"#);
        let json = serde_json::to_string(&MissReason::NoMatches).expect("serialize");
        assert_eq!(json, r#"{"kind":"no_matches"}"#);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(NomadError::EmptyQuery.to_string(), "Query must not be empty");
        let err = NomadError::InvalidTransition {
            from: "Rendered",
            to: "Searching",
        };
        assert_eq!(
            err.to_string(),
            "Invalid submission transition: Rendered -> Searching"
        );
    }
}
