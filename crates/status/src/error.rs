//! Status store error types.

use thiserror::Error;

/// Status store operation errors.
///
/// A missing record is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored status for study {study_uid}: {source}")]
    Decode {
        study_uid: String,
        #[source]
        source: strata_core::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for status store operations.
pub type StatusResult<T> = std::result::Result<T, StatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_study() {
        let err = StatusError::Decode {
            study_uid: "1.2.840.1".to_string(),
            source: strata_core::Error::InvalidLocationType("moon".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.2.840.1"));
        assert!(msg.contains("moon"));
    }
}
