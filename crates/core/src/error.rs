//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid location type: {0}")]
    InvalidLocationType(String),

    #[error("edge id {edge_id:?} is only valid for edge locations, not {location_type}")]
    EdgeIdWithoutEdge {
        location_type: String,
        edge_id: String,
    },

    #[error("invalid move request: {0}")]
    InvalidMoveRequest(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
