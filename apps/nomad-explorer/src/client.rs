//! # NOMAD HTTP Client
//!
//! Wrapper around the two NOMAD endpoints a submission touches:
//!
//! - `GET {base}/entries?elements=<query>&per_page=1` - EntryLookup
//! - `GET {base}/entries/{entry_id}/archive` - ArchiveLookup
//!
//! A non-200 status is never an error here. The search reports it as a
//! miss and the archive lookup returns an empty document. Only transport
//! failures and undecodable 200 bodies surface as [`ClientError`].

use nomad_core::primitives::{ARCHIVE_SEGMENT, ENTRIES_PATH, RESULTS_PER_PAGE};
use nomad_core::{Archive, Entry, MissReason, Query, SearchResponse};
use reqwest::{StatusCode, Url};
use std::future::Future;
use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(Debug)]
pub enum ClientError {
    /// Cannot reach NOMAD (DNS, refused connection, timeout, reset).
    Transport(String),
    /// The configured base URL cannot address the endpoints.
    InvalidUrl(String),
    /// A 200 response whose body is not the expected JSON.
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Cannot connect to NOMAD: {msg}"),
            Self::InvalidUrl(url) => write!(f, "Invalid NOMAD URL: {url}"),
            Self::Decode(msg) => write!(f, "Malformed response from NOMAD: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// What the search endpoint produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Hit(Entry),
    Miss(MissReason),
}

/// Source of entries and archives.
///
/// [`NomadClient`] is the only production implementation; the seam lets the
/// lookup pipeline run against scripted sources.
pub trait MaterialsSource {
    /// EntryLookup: the first entry matching `query`.
    fn search(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<SearchResult, ClientError>> + Send;

    /// ArchiveLookup: the archive of `entry_id`, empty on a non-200 status.
    fn archive(&self, entry_id: &str) -> impl Future<Output = Result<Archive, ClientError>> + Send;
}

/// HTTP client for the NOMAD API.
#[derive(Clone)]
pub struct NomadClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NomadClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `timeout` of `None` keeps the transport default.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("client setup failed: {e}")))?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let resp = req.send().await?;
        tracing::debug!(url = %resp.url(), status = resp.status().as_u16(), "NOMAD responded");
        Ok(resp)
    }
}

impl MaterialsSource for NomadClient {
    async fn search(&self, query: &Query) -> Result<SearchResult, ClientError> {
        let url = self.endpoint(&[ENTRIES_PATH])?;
        tracing::debug!(%url, elements = %query, "searching entries");

        let req = self
            .http
            .get(url)
            .query(&[("elements", query.as_str())])
            .query(&[("per_page", RESULTS_PER_PAGE)]);
        let resp = self.send(req).await?;

        let status = resp.status();
        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                elements = %query,
                "entry search returned non-200; treating as no result"
            );
            return Ok(SearchResult::Miss(MissReason::UpstreamStatus {
                status: status.as_u16(),
            }));
        }

        let body: SearchResponse = resp.json().await?;
        Ok(match body.into_first() {
            Some(entry) => SearchResult::Hit(entry),
            None => SearchResult::Miss(MissReason::NoMatches),
        })
    }

    async fn archive(&self, entry_id: &str) -> Result<Archive, ClientError> {
        let url = self.endpoint(&[ENTRIES_PATH, entry_id, ARCHIVE_SEGMENT])?;
        tracing::debug!(%url, entry_id, "fetching archive");

        let resp = self.send(self.http.get(url)).await?;
        let status = resp.status();
        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                entry_id,
                "archive returned non-200; treating as empty"
            );
            return Ok(Archive::empty());
        }

        Ok(resp.json::<Archive>().await?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
