//! # Lookup Pipeline
//!
//! Runs one submission: EntryLookup, then ArchiveLookup if an entry was
//! found, driving a [`Submission`] through its states. Any failure on the
//! way ends the submission in `Errored`; nothing gathered before the failure
//! is rendered.

use crate::client::{ClientError, MaterialsSource, SearchResult};
use nomad_core::{LookupOutcome, MissReason, NomadError, Query, Report, Submission};

/// Failure that ends a submission in `Errored`.
#[derive(Debug)]
pub enum LookupError {
    Client(ClientError),
    State(NomadError),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(e) => write!(f, "{e}"),
            Self::State(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<ClientError> for LookupError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

impl From<NomadError> for LookupError {
    fn from(e: NomadError) -> Self {
        Self::State(e)
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Run one submission for a validated query.
///
/// Never fails: transport errors become `LookupOutcome::Errored`.
pub async fn run_lookup<S>(source: &S, query: Query) -> LookupOutcome
where
    S: MaterialsSource + Sync,
{
    let label = query.to_string();
    let mut submission = Submission::new();

    if let Err(e) = drive(source, query, &mut submission).await {
        tracing::error!(query = %label, error = %e, "lookup failed");
        if let Err(state_err) = submission.fail(e.to_string()) {
            tracing::error!(error = %state_err, "could not record lookup failure");
            return LookupOutcome::errored(e.to_string());
        }
    }

    let outcome = submission
        .into_outcome()
        .unwrap_or_else(|e| LookupOutcome::errored(e.to_string()));
    tracing::info!(query = %label, outcome = outcome.label(), "lookup finished");
    outcome
}

async fn drive<S>(source: &S, query: Query, submission: &mut Submission) -> Result<(), LookupError>
where
    S: MaterialsSource + Sync,
{
    submission.begin(query.clone())?;
    tracing::debug!(state = %submission.state(), "submission transition");

    match source.search(&query).await? {
        SearchResult::Hit(entry) => {
            submission.found(entry)?;
            tracing::debug!(state = %submission.state(), "submission transition");
        }
        SearchResult::Miss(reason) => {
            if let MissReason::UpstreamStatus { status } = reason {
                tracing::warn!(query = %query, status, "search unavailable; showing no results");
            }
            submission.not_found(reason)?;
            tracing::debug!(state = %submission.state(), %reason, "submission transition");
            submission.render()?;
            return Ok(());
        }
    }

    match submission.fetch_archive()? {
        Some(entry_id) => {
            tracing::debug!(state = %submission.state(), "submission transition");
            let archive = source.archive(&entry_id).await?;
            if archive.is_empty() {
                tracing::debug!(entry_id = %entry_id, "archive is empty");
            }
            submission.archive_fetched(archive.band_gap())?;
        }
        None => {
            tracing::debug!("entry has no identifier; skipping archive");
            submission.skip_archive()?;
        }
    }
    tracing::debug!(state = %submission.state(), "submission transition");
    Ok(())
}

// =============================================================================
// RAW INPUT
// =============================================================================

/// What a display surface gets back for raw user input.
#[derive(Debug)]
pub enum Submitted {
    /// Blank input: nothing was submitted.
    Idle,
    /// A lookup ran.
    Completed(LookupOutcome),
}

impl Submitted {
    pub fn report(&self) -> Report {
        match self {
            Self::Idle => Report::idle(),
            Self::Completed(outcome) => Report::from_outcome(outcome),
        }
    }

    pub fn outcome(&self) -> Option<&LookupOutcome> {
        match self {
            Self::Completed(outcome) => Some(outcome),
            Self::Idle => None,
        }
    }
}

/// Trim raw input and, unless it is blank, run the lookup.
pub async fn submit<S>(source: &S, raw: &str) -> Submitted
where
    S: MaterialsSource + Sync,
{
    match Query::new(raw) {
        Ok(query) => Submitted::Completed(run_lookup(source, query).await),
        Err(e) => {
            tracing::debug!(error = %e, "nothing submitted");
            Submitted::Idle
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
