// ================================================================
// File: timerdash-common/src/error.rs
// ================================================================

use thiserror::Error;

/// How a failed request should be treated by the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network trouble, timeouts, non-2xx other than 401. Recovered per slice.
    Transient,
    /// 401 from the server. Not recoverable locally; the session is torn down.
    Unauthorized,
    /// The body did not have the expected shape. Handled like `Transient`.
    Malformed,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Timeout error: {0}")]
    Timeout(#[from] tokio::time::error::Elapsed),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not logged in")]
    NotLoggedIn,
}

impl Error {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Unauthorized(_) => FailureKind::Unauthorized,
            Error::Json(_) | Error::MalformedResponse(_) => FailureKind::Malformed,
            Error::Http(e) if e.is_decode() => FailureKind::Malformed,
            _ => FailureKind::Transient,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.failure_kind() == FailureKind::Unauthorized
    }
}
