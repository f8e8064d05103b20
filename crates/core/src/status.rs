//! Study status records: which tier holds a study and where that tier lives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage tier of a study.
///
/// Tiers are enumerated by convention only. Any string is accepted and
/// round-trips unchanged through [`Tier::as_str`], but only [`Tier::Hot`]
/// is ever eligible for retrieval.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Immediately retrievable.
    Hot,
    Warm,
    Cold,
    Archive,
    /// Any tier name this crate does not recognize.
    Other(String),
}

impl Tier {
    /// Parse from string. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "hot" => Self::Hot,
            "warm" => Self::Warm,
            "cold" => Self::Cold,
            "archive" => Self::Archive,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Archive => "archive",
            Self::Other(s) => s,
        }
    }

    pub fn is_hot(&self) -> bool {
        matches!(self, Self::Hot)
    }
}

impl From<&str> for Tier {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Tier {
    fn from(s: String) -> Self {
        match Self::parse(&s) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Kind of backing store currently holding a tier's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// A specific local edge site.
    Edge,
    /// Cloud object storage.
    Cloud,
    /// Not known (e.g. a move to hot without a target site).
    Unknown,
}

impl LocationType {
    /// Parse from string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "edge" => Ok(Self::Edge),
            "cloud" => Ok(Self::Cloud),
            "unknown" => Ok(Self::Unknown),
            _ => Err(crate::Error::InvalidLocationType(s.to_string())),
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edge => "edge",
            Self::Cloud => "cloud",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a study's tier lives.
///
/// An edge id only exists for edge locations, so a stale edge id on a cloud
/// or unknown location cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Edge { edge_id: Option<String> },
    Cloud,
    Unknown,
}

impl Location {
    pub fn location_type(&self) -> LocationType {
        match self {
            Self::Edge { .. } => LocationType::Edge,
            Self::Cloud => LocationType::Cloud,
            Self::Unknown => LocationType::Unknown,
        }
    }

    pub fn edge_id(&self) -> Option<&str> {
        match self {
            Self::Edge { edge_id } => edge_id.as_deref(),
            Self::Cloud | Self::Unknown => None,
        }
    }
}

/// Current tier/location fact for one study.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StatusWire", try_from = "StatusWire")]
pub struct StatusRecord {
    pub tier: Tier,
    pub location: Location,
}

impl StatusRecord {
    pub fn new(tier: impl Into<Tier>, location: Location) -> Self {
        Self {
            tier: tier.into(),
            location,
        }
    }

    /// Status assumed for a study this system has never recorded:
    /// hot, on an unspecified edge site.
    pub fn default_for_new_study() -> Self {
        Self::new(Tier::Hot, Location::Edge { edge_id: None })
    }

    /// Build a record from its flat storage/wire representation.
    ///
    /// Rejects an edge id paired with a non-edge location type.
    pub fn from_parts(
        tier: impl Into<Tier>,
        location_type: &str,
        edge_id: Option<String>,
    ) -> crate::Result<Self> {
        let location = match (LocationType::parse(location_type)?, edge_id) {
            (LocationType::Edge, edge_id) => Location::Edge { edge_id },
            (LocationType::Cloud, None) => Location::Cloud,
            (LocationType::Unknown, None) => Location::Unknown,
            (other, Some(edge_id)) => {
                return Err(crate::Error::EdgeIdWithoutEdge {
                    location_type: other.as_str().to_string(),
                    edge_id,
                });
            }
        };
        Ok(Self::new(tier, location))
    }

    pub fn location_type(&self) -> LocationType {
        self.location.location_type()
    }

    pub fn edge_id(&self) -> Option<&str> {
        self.location.edge_id()
    }

    /// Whether retrieval of this study's data may proceed.
    pub fn permits_retrieval(&self) -> bool {
        crate::gate::permit(self)
    }
}

/// Flat JSON shape of a [`StatusRecord`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusWire {
    tier: Tier,
    location_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edge_id: Option<String>,
}

impl From<StatusRecord> for StatusWire {
    fn from(record: StatusRecord) -> Self {
        let location_type = record.location_type().as_str().to_string();
        let edge_id = match record.location {
            Location::Edge { edge_id } => edge_id,
            Location::Cloud | Location::Unknown => None,
        };
        Self {
            tier: record.tier,
            location_type,
            edge_id,
        }
    }
}

impl TryFrom<StatusWire> for StatusRecord {
    type Error = crate::Error;

    fn try_from(wire: StatusWire) -> crate::Result<Self> {
        Self::from_parts(wire.tier, &wire.location_type, wire.edge_id)
    }
}
