//! Error types for resource submission.

use thiserror::Error;

use crate::outcome::Issue;

/// Errors raised while submitting one resource.
///
/// All variants except `Build` concern a single resource and are handled by
/// skipping the row that produced it; `Build` occurs before any row is
/// processed and aborts the run.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to construct the HTTP client.
    #[error("failed to build HTTP client: {source}")]
    Build {
        #[source]
        source: reqwest::Error,
    },

    /// The resource could not be serialized to JSON.
    #[error("failed to serialize resource: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The transport call itself failed (no usable response).
    #[error("connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// `$validate` did not answer with 200.
    #[error("validation call to {url} returned status {status}")]
    ValidateTransport { url: String, status: u16 },

    /// The server reported issues of severity `error` on `$validate`.
    #[error("resource not valid: {}", format_issues(.issues))]
    Validation { issues: Vec<Issue> },

    /// The create call did not answer with 201 Created.
    #[error("resource could not be created (status {status}): {body}")]
    Creation { status: u16, body: String },

    /// A response body was not the JSON document we expected.
    #[error("unexpected response body from {url}: {message}")]
    InvalidBody { url: String, message: String },

    /// The created resource carries no id.
    #[error("create response contains no resource id")]
    MissingId,
}

fn format_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::summary)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
