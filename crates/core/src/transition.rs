//! Move requests and the status transition they produce.

use crate::status::{Location, StatusRecord, Tier};
use serde::{Deserialize, Serialize};

/// Operator request to move a study to another tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub target_tier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_location: Option<String>,
}

/// Status computed from a move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The new current status.
    pub record: StatusRecord,
    /// Set when the request asked for hot without naming an edge site.
    pub ambiguous: bool,
}

impl MoveRequest {
    pub fn new(target_tier: impl Into<String>, target_location: Option<&str>) -> Self {
        Self {
            target_tier: target_tier.into(),
            target_location: target_location.map(str::to_string),
        }
    }

    /// Reject requests without a usable target tier.
    pub fn validate(&self) -> crate::Result<()> {
        if self.target_tier.trim().is_empty() {
            return Err(crate::Error::InvalidMoveRequest(
                "targetTier is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Target location, treating empty or whitespace-only values as not provided.
    pub fn location(&self) -> Option<&str> {
        self.target_location
            .as_deref()
            .filter(|location| !location.trim().is_empty())
    }

    /// Compute the status this request moves the study to.
    ///
    /// Hot with a location pins the study to that edge site. Hot without one
    /// is accepted with an unknown location. Every other tier lives in the
    /// cloud and any supplied location is discarded.
    pub fn resolve(&self) -> Transition {
        let tier = Tier::from(self.target_tier.clone());
        match (tier.is_hot(), self.location()) {
            (true, Some(site)) => Transition {
                record: StatusRecord::new(
                    tier,
                    Location::Edge {
                        edge_id: Some(site.to_string()),
                    },
                ),
                ambiguous: false,
            },
            (true, None) => Transition {
                record: StatusRecord::new(tier, Location::Unknown),
                ambiguous: true,
            },
            (false, _) => Transition {
                record: StatusRecord::new(tier, Location::Cloud),
                ambiguous: false,
            },
        }
    }
}
