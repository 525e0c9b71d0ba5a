//! dmdd-core integration
//!
//! HTTP client for the backend API plus the endpoint table it exposes.

mod client;
pub mod endpoints;
mod version;

pub use client::BackendClient;
pub use version::{parse_version, FormattedVersion};
