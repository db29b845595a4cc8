//! # Submission State Machine
//!
//! Tracks one user submission from input to render.
//!
//! ```text
//! NoQuery --begin--> Searching --found--> Found --fetch_archive--> ArchiveFetching
//!                        |                  |                            |
//!                        |             skip_archive               archive_fetched
//!                        |                  v                            v
//!                        +--not_found--> NotFound --render--------> Rendered
//!
//! any non-terminal state --fail--> Errored
//! ```
//!
//! `Rendered` and `Errored` are terminal. There is no retry edge: a new
//! submission starts a fresh `Submission`.

use crate::outcome::LookupOutcome;
use crate::types::{BandGap, Entry, MissReason, NomadError, Query};
use std::fmt;

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    NoQuery,
    Searching,
    Found,
    ArchiveFetching,
    NotFound,
    Rendered,
    Errored,
}

impl SubmissionState {
    pub fn name(self) -> &'static str {
        match self {
            Self::NoQuery => "NoQuery",
            Self::Searching => "Searching",
            Self::Found => "Found",
            Self::ArchiveFetching => "ArchiveFetching",
            Self::NotFound => "NotFound",
            Self::Rendered => "Rendered",
            Self::Errored => "Errored",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rendered | Self::Errored)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One submission and everything it has gathered so far.
#[derive(Debug, Clone)]
pub struct Submission {
    state: SubmissionState,
    query: Option<Query>,
    entry: Option<Entry>,
    band_gap: Option<BandGap>,
    miss: Option<MissReason>,
    error: Option<String>,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SubmissionState::NoQuery,
            query: None,
            entry: None,
            band_gap: None,
            miss: None,
            error: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    fn transition(
        &mut self,
        allowed: &[SubmissionState],
        to: SubmissionState,
    ) -> Result<(), NomadError> {
        if !allowed.contains(&self.state) {
            return Err(NomadError::InvalidTransition {
                from: self.state.name(),
                to: to.name(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// NoQuery -> Searching.
    pub fn begin(&mut self, query: Query) -> Result<(), NomadError> {
        self.transition(&[SubmissionState::NoQuery], SubmissionState::Searching)?;
        self.query = Some(query);
        Ok(())
    }

    /// Searching -> Found.
    pub fn found(&mut self, entry: Entry) -> Result<(), NomadError> {
        self.transition(&[SubmissionState::Searching], SubmissionState::Found)?;
        self.entry = Some(entry);
        Ok(())
    }

    /// Searching -> NotFound.
    pub fn not_found(&mut self, reason: MissReason) -> Result<(), NomadError> {
        self.transition(&[SubmissionState::Searching], SubmissionState::NotFound)?;
        self.miss = Some(reason);
        Ok(())
    }

    /// Found -> ArchiveFetching. Returns the identifier to fetch, or `None`
    /// (leaving the state untouched) when the entry has no usable identifier.
    pub fn fetch_archive(&mut self) -> Result<Option<String>, NomadError> {
        if self.state != SubmissionState::Found {
            return Err(NomadError::InvalidTransition {
                from: self.state.name(),
                to: SubmissionState::ArchiveFetching.name(),
            });
        }
        let Some(id) = self.entry.as_ref().and_then(|e| e.entry_id()) else {
            return Ok(None);
        };
        let id = id.to_string();
        self.state = SubmissionState::ArchiveFetching;
        Ok(Some(id))
    }

    /// Found -> Rendered, for entries whose archive cannot be addressed.
    pub fn skip_archive(&mut self) -> Result<(), NomadError> {
        self.transition(&[SubmissionState::Found], SubmissionState::Rendered)
    }

    /// ArchiveFetching -> Rendered.
    pub fn archive_fetched(&mut self, band_gap: Option<BandGap>) -> Result<(), NomadError> {
        self.transition(
            &[SubmissionState::ArchiveFetching],
            SubmissionState::Rendered,
        )?;
        self.band_gap = band_gap;
        Ok(())
    }

    /// NotFound -> Rendered.
    pub fn render(&mut self) -> Result<(), NomadError> {
        self.transition(&[SubmissionState::NotFound], SubmissionState::Rendered)
    }

    /// Any non-terminal state -> Errored. Discards anything gathered so far.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), NomadError> {
        if self.state.is_terminal() {
            return Err(NomadError::InvalidTransition {
                from: self.state.name(),
                to: SubmissionState::Errored.name(),
            });
        }
        self.state = SubmissionState::Errored;
        self.entry = None;
        self.band_gap = None;
        self.miss = None;
        self.error = Some(message.into());
        Ok(())
    }

    /// Consume a terminal submission into its outcome.
    pub fn into_outcome(self) -> Result<LookupOutcome, NomadError> {
        match (self.state, self.entry, self.miss, self.error) {
            (SubmissionState::Rendered, Some(entry), _, _) => Ok(LookupOutcome::Found {
                entry,
                band_gap: self.band_gap,
            }),
            (SubmissionState::Rendered, None, Some(reason), _) => {
                Ok(LookupOutcome::NotFound { reason })
            }
            (SubmissionState::Errored, _, _, Some(message)) => Ok(LookupOutcome::Errored { message }),
            (state, ..) => Err(NomadError::InvalidTransition {
                from: state.name(),
                to: "Outcome",
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: &str) -> Query {
        Query::new(raw).expect("valid query")
    }

    fn entry_with_id(id: &str) -> Entry {
        Entry {
            entry_id: Some(id.to_string()),
            formula: Some("Li".to_string()),
            ..Entry::default()
        }
    }

    #[test]
    fn test_found_path() {
        let mut s = Submission::new();
        assert_eq!(s.state(), SubmissionState::NoQuery);

        s.begin(query("Li")).expect("begin");
        assert_eq!(s.state(), SubmissionState::Searching);
        assert_eq!(s.query().map(Query::as_str), Some("Li"));

        s.found(entry_with_id("E1")).expect("found");
        let id = s.fetch_archive().expect("fetch").expect("has id");
        assert_eq!(id, "E1");
        assert_eq!(s.state(), SubmissionState::ArchiveFetching);

        s.archive_fetched(Some(BandGap::new(0.0))).expect("archive");
        assert_eq!(s.state(), SubmissionState::Rendered);

        match s.into_outcome().expect("outcome") {
            LookupOutcome::Found { entry, band_gap } => {
                assert_eq!(entry.entry_id(), Some("E1"));
                assert_eq!(band_gap, Some(BandGap::new(0.0)));
            }
            other => unreachable!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_path() {
        let mut s = Submission::new();
        s.begin(query("Xx")).expect("begin");
        s.not_found(MissReason::UpstreamStatus { status: 503 })
            .expect("not found");
        assert_eq!(s.state(), SubmissionState::NotFound);
        s.render().expect("render");

        assert_eq!(
            s.into_outcome().expect("outcome"),
            LookupOutcome::NotFound {
                reason: MissReason::UpstreamStatus { status: 503 }
            }
        );
    }

    #[test]
    fn test_entry_without_id_skips_archive() {
        let mut s = Submission::new();
        s.begin(query("Li")).expect("begin");
        s.found(Entry::default()).expect("found");

        assert_eq!(s.fetch_archive().expect("fetch"), None);
        assert_eq!(s.state(), SubmissionState::Found);

        s.skip_archive().expect("skip");
        match s.into_outcome().expect("outcome") {
            LookupOutcome::Found { band_gap, .. } => assert_eq!(band_gap, None),
            other => unreachable!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_discards_partial_results() {
        let mut s = Submission::new();
        s.begin(query("Li")).expect("begin");
        s.found(entry_with_id("E1")).expect("found");
        s.fetch_archive().expect("fetch");

        s.fail("connection refused").expect("fail");
        assert_eq!(s.state(), SubmissionState::Errored);
        assert!(s.entry().is_none());
        assert_eq!(
            s.into_outcome().expect("outcome"),
            LookupOutcome::errored("connection refused")
        );
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut s = Submission::new();
        s.begin(query("Li")).expect("begin");
        s.fail("boom").expect("fail");

        assert!(s.fail("again").is_err());
        assert!(s.begin(query("Mg")).is_err());
        assert!(s.found(Entry::default()).is_err());
    }

    #[test]
    fn test_out_of_order_transitions_rejected() {
        let mut s = Submission::new();
        let err = s.found(Entry::default()).expect_err("cannot find before searching");
        assert!(matches!(
            err,
            NomadError::InvalidTransition {
                from: "NoQuery",
                to: "Found"
            }
        ));
        assert!(s.fetch_archive().is_err());
        assert!(s.archive_fetched(None).is_err());
        assert!(s.render().is_err());
    }

    #[test]
    fn test_non_terminal_outcome_rejected() {
        let mut s = Submission::new();
        s.begin(query("Li")).expect("begin");
        assert!(s.into_outcome().is_err());
    }
}
