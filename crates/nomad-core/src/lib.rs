//! # nomad-core
//!
//! The pure logic behind the NOMAD material explorer - THE LOGIC.
//!
//! A submission takes a formula or element symbol, finds at most one NOMAD
//! entry for it, optionally reads the band gap out of that entry's archive,
//! and renders a fixed set of fields. This crate owns every step of that
//! except the two HTTP calls:
//!
//! - `types` - the optional-field records the upstream returns
//! - `lenient` - serde helpers that turn odd upstream values into "absent"
//! - `submission` - the per-submission state machine
//! - `outcome` - the result variant a submission ends in
//! - `render` - the display report built from an outcome
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never persists anything; each submission starts from scratch
//! - A missing upstream field is never an error

// =============================================================================
// MODULES
// =============================================================================

pub mod lenient;
pub mod outcome;
pub mod primitives;
pub mod render;
pub mod submission;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use outcome::LookupOutcome;
pub use render::{BandGapLine, EntryReport, Field, Report, ReportBody};
pub use submission::{Submission, SubmissionState};
pub use types::{
    Archive, AtomsInfo, BandGap, DftInfo, Entry, MissReason, NomadError, Query, SearchResponse,
};
