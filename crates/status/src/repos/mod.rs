//! Repository traits for status operations.

pub mod status;

pub use status::StatusRepo;
