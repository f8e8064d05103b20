//! Core domain types for tiered study storage tracking.
//!
//! This crate defines the data model shared by every other crate:
//! - Status records: which tier holds a study and where that tier lives
//! - The access gate deciding whether retrieval may proceed
//! - Move transitions computing the next status from an operator request
//! - Configuration types for the server, status store and PACS client

pub mod config;
pub mod error;
pub mod gate;
pub mod status;
pub mod transition;

pub use error::{Error, Result};
pub use gate::{GateDecision, Retrieval, permit};
pub use status::{Location, LocationType, StatusRecord, Tier};
pub use transition::{MoveRequest, Transition};
