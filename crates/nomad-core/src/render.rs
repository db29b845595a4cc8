//! # Report Rendering
//!
//! Turns a [`LookupOutcome`] into the display-neutral [`Report`] every
//! surface (terminal, web page, JSON) prints. This is the only place that
//! substitutes placeholders and formats the band gap.
//!
//! ## Field order
//!
//! A found entry always yields the same eight fields, in this order:
//! Formula, Entry ID, DFT Code, XC Functional, Number of Atoms, Elements,
//! System Type, Upload Time. The band gap line follows.

use crate::outcome::LookupOutcome;
use crate::primitives::{
    BAND_GAP_UNAVAILABLE_WARNING, ELEMENT_SEPARATOR, NO_RESULTS_WARNING, PAGE_CAPTION, PAGE_TITLE,
    PLACEHOLDER, UNKNOWN_FORMULA,
};
use crate::types::{BandGap, Entry};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const LABEL_FORMULA: &str = "Formula";
pub const LABEL_ENTRY_ID: &str = "Entry ID";
pub const LABEL_DFT_CODE: &str = "DFT Code";
pub const LABEL_XC_FUNCTIONAL: &str = "XC Functional";
pub const LABEL_N_ATOMS: &str = "Number of Atoms";
pub const LABEL_ELEMENTS: &str = "Elements";
pub const LABEL_SYSTEM_TYPE: &str = "System Type";
pub const LABEL_UPLOAD_TIME: &str = "Upload Time";
pub const LABEL_BAND_GAP: &str = "Band Gap";

// =============================================================================
// REPORT TYPES
// =============================================================================

/// One labelled line of a found entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// The band gap line: a formatted value or the "not available" warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum BandGapLine {
    Value(String),
    Unavailable(String),
}

/// Everything shown for a found entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    pub subheader: String,
    pub fields: Vec<Field>,
    pub band_gap: BandGapLine,
}

impl EntryReport {
    /// Value of the field with the given label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// What goes under the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ReportBody {
    /// No query submitted yet.
    Idle,
    Entry(EntryReport),
    Warning(String),
    Error(String),
}

/// A complete rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub caption: String,
    pub body: ReportBody,
}

// =============================================================================
// RENDERING
// =============================================================================

impl Report {
    fn with_body(body: ReportBody) -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            caption: PAGE_CAPTION.to_string(),
            body,
        }
    }

    /// The page before anything was submitted.
    #[must_use]
    pub fn idle() -> Self {
        Self::with_body(ReportBody::Idle)
    }

    #[must_use]
    pub fn from_outcome(outcome: &LookupOutcome) -> Self {
        let body = match outcome {
            LookupOutcome::Found { entry, band_gap } => {
                ReportBody::Entry(render_entry(entry, *band_gap))
            }
            LookupOutcome::NotFound { .. } => ReportBody::Warning(NO_RESULTS_WARNING.to_string()),
            LookupOutcome::Errored { message } => ReportBody::Error(message.clone()),
        };
        Self::with_body(body)
    }

    /// The found-entry section, if any.
    pub fn entry(&self) -> Option<&EntryReport> {
        match &self.body {
            ReportBody::Entry(report) => Some(report),
            _ => None,
        }
    }

    /// Plain-text rendering for terminals: header, then body.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", self.caption);
        out.push_str(&self.body_text());
        out
    }

    /// Plain-text rendering of the body alone, preceded by a blank line.
    /// Empty for an idle report.
    pub fn body_text(&self) -> String {
        let mut out = String::new();
        match &self.body {
            ReportBody::Idle => {}
            ReportBody::Entry(report) => {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", report.subheader);
                for field in &report.fields {
                    let _ = writeln!(out, "{}: {}", field.label, field.value);
                }
                match &report.band_gap {
                    BandGapLine::Value(value) => {
                        let _ = writeln!(out, "{}: {}", LABEL_BAND_GAP, value);
                    }
                    BandGapLine::Unavailable(warning) => {
                        let _ = writeln!(out, "Warning: {}", warning);
                    }
                }
            }
            ReportBody::Warning(warning) => {
                let _ = writeln!(out);
                let _ = writeln!(out, "Warning: {}", warning);
            }
            ReportBody::Error(message) => {
                let _ = writeln!(out);
                let _ = writeln!(out, "Error: {}", message);
            }
        }
        out
    }
}

fn text_or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

fn render_entry(entry: &Entry, band_gap: Option<BandGap>) -> EntryReport {
    let subheader = format!(
        "NOMAD Entry Found: {}",
        entry.formula().unwrap_or(UNKNOWN_FORMULA)
    );

    let fields = vec![
        Field::new(LABEL_FORMULA, text_or_placeholder(entry.formula())),
        Field::new(LABEL_ENTRY_ID, text_or_placeholder(entry.entry_id())),
        Field::new(LABEL_DFT_CODE, text_or_placeholder(entry.code_name())),
        Field::new(LABEL_XC_FUNCTIONAL, text_or_placeholder(entry.xc_functional())),
        Field::new(
            LABEL_N_ATOMS,
            entry
                .n_atoms()
                .map(|n| n.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
        Field::new(LABEL_ELEMENTS, entry.elements().join(ELEMENT_SEPARATOR)),
        Field::new(LABEL_SYSTEM_TYPE, text_or_placeholder(entry.structure_type())),
        Field::new(LABEL_UPLOAD_TIME, text_or_placeholder(entry.upload_time())),
    ];

    let band_gap = match band_gap {
        Some(gap) => BandGapLine::Value(gap.to_string()),
        None => BandGapLine::Unavailable(BAND_GAP_UNAVAILABLE_WARNING.to_string()),
    };

    EntryReport {
        subheader,
        fields,
        band_gap,
    }
}

// =============================================================================
// TESTS
// =============================================================================
