//! # CoreShift Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The backend REST gateway (auth, profile and feedback endpoints)
//! - File-backed session persistence
//! - Configuration loading (environment, file, defaults)
//!
//! ## Architecture
//! - Implements traits defined in `coreshift-core`
//! - Depends on `coreshift-domain` and `coreshift-core`
//! - Contains all "impure" code (HTTP, filesystem, environment)

pub mod api;
pub mod config;
pub mod http;
pub mod session;

// Re-export commonly used items
pub use api::{BackendClient, BackendClientConfig};
pub use http::HttpClient;
pub use session::FileSessionStorage;
