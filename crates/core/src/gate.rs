//! Access gate applied before any artifact retrieval.

use crate::status::StatusRecord;
use std::fmt;

/// Retrieval operations subject to the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Retrieval {
    /// Rendered instance preview image.
    Preview,
    /// Simplified instance metadata.
    SimplifiedTags,
    /// Raw instance file.
    File,
}

impl Retrieval {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::SimplifiedTags => "simplified_tags",
            Self::File => "file",
        }
    }

    /// Human-readable name of the artifact, for denial messages.
    pub fn artifact(&self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::SimplifiedTags => "Instance tags",
            Self::File => "Instance file",
        }
    }
}

impl fmt::Display for Retrieval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating the gate against a status record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Permit,
    /// Retrieval refused; carries the record that caused the refusal.
    Deny(StatusRecord),
}

/// The retrieval predicate. Only hot studies may be retrieved.
pub fn permit(record: &StatusRecord) -> bool {
    record.tier.is_hot()
}

/// Evaluate the gate, keeping the record on denial so callers can report it.
pub fn evaluate(record: StatusRecord) -> GateDecision {
    if permit(&record) {
        GateDecision::Permit
    } else {
        GateDecision::Deny(record)
    }
}
