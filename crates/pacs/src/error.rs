//! PACS client error types.

use thiserror::Error;

/// Upstream response bodies kept in errors are capped at this many bytes.
pub const ERROR_BODY_LIMIT: usize = 1024;

/// Errors returned by a [`crate::PacsClient`].
#[derive(Debug, Error)]
pub enum PacsError {
    /// The upstream answered 404 for the requested study or instance.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl PacsError {
    /// Whether the upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PacsError::NotFound(_))
    }

    /// Whether the call failed because the upstream did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PacsError::Transport(e) if e.is_timeout())
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PacsError::NotFound(_) => "not_found",
            PacsError::Transport(e) if e.is_timeout() => "timeout",
            PacsError::Transport(_) => "transport",
            PacsError::UnexpectedStatus { .. } => "unexpected_status",
            PacsError::Decode(_) => "decode",
            PacsError::InvalidRequest(_) => "invalid_request",
            PacsError::Config(_) => "config",
        }
    }
}

/// Result type for PACS client operations.
pub type PacsResult<T> = std::result::Result<T, PacsError>;

/// Truncate an upstream body to [`ERROR_BODY_LIMIT`] bytes for error reporting.
pub(crate) fn capped_body(bytes: &[u8]) -> String {
    let end = bytes.len().min(ERROR_BODY_LIMIT);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
