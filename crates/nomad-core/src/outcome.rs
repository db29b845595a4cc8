//! # Lookup Outcome
//!
//! The single value a submission ends in. Display surfaces consume this and
//! nothing else.

use crate::types::{BandGap, Entry, MissReason};
use serde::{Deserialize, Serialize};

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// An entry matched. `band_gap` is `None` when the archive lacked it.
    Found {
        entry: Entry,
        band_gap: Option<BandGap>,
    },
    /// Nothing to show; rendered as a warning, not an error.
    NotFound { reason: MissReason },
    /// A transport or unexpected failure; rendered as an error message.
    Errored { message: String },
}

impl LookupOutcome {
    pub fn errored(message: impl Into<String>) -> Self {
        Self::Errored {
            message: message.into(),
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Found { .. } => "found",
            Self::NotFound { .. } => "not_found",
            Self::Errored { .. } => "errored",
        }
    }
}
