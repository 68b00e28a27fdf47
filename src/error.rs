//! Error types for the leaderboard and local store
//!
//! Neither is ever fatal to a run: the reporter recovers from both.

use thiserror::Error;

/// Talking to the leaderboard service failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Transport error or a non-success status
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// Body was not JSON or did not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::MalformedResponse(e.to_string())
    }
}

/// Reading or writing the local fallback store failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt score list: {0}")]
    Serde(#[from] serde_json::Error),
}
