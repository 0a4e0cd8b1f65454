/// Error kinds surfaced by the ingestion layer

use thiserror::Error;

/// Underlying reason a request to the data provider did not produce a usable body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Request exceeded the configured timeout
    Timeout,
    /// Could not reach the provider
    Connect(String),
    /// Provider answered with a non-2xx status
    Status(u16),
    /// Any other transport-level fault
    Transport(String),
    /// Body was not the JSON we expected
    Decode(String),
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCause::Timeout => write!(f, "request timed out"),
            FailureCause::Connect(msg) => write!(f, "connection failed: {}", msg),
            FailureCause::Status(code) => write!(f, "HTTP status {}", code),
            FailureCause::Transport(msg) => write!(f, "transport error: {}", msg),
            FailureCause::Decode(msg) => write!(f, "malformed response body: {}", msg),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("Upstream request failed: {cause}")]
    IngestionFailure { cause: FailureCause },

    #[error("Upstream rejected the request: {reason}")]
    UpstreamRejected { reason: String },
}

impl IngestError {
    pub fn failure(cause: FailureCause) -> Self {
        IngestError::IngestionFailure { cause }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        IngestError::UpstreamRejected {
            reason: reason.into(),
        }
    }

    /// Whether repeating the same request could reasonably succeed
    pub fn is_transient(&self) -> bool {
        match self {
            IngestError::IngestionFailure { cause } => match cause {
                FailureCause::Timeout | FailureCause::Connect(_) | FailureCause::Transport(_) => true,
                FailureCause::Status(code) => *code == 429 || (500..600).contains(code),
                FailureCause::Decode(_) => false,
            },
            IngestError::UpstreamRejected { .. } => false,
        }
    }
}
