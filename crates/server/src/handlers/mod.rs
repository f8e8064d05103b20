//! HTTP request handlers.

pub mod common;
pub mod health;
pub mod instances;
pub mod status;
pub mod studies;

pub use common::*;
pub use health::*;
pub use instances::*;
pub use status::*;
pub use studies::*;
