//! Common test utilities and fixtures.

pub mod http;
pub mod pacs;
pub mod server;
pub mod store;

#[allow(unused_imports)]
pub use http::*;
#[allow(unused_imports)]
pub use pacs::*;
#[allow(unused_imports)]
pub use server::*;
#[allow(unused_imports)]
pub use store::*;
