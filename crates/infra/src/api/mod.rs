//! Backend REST API gateway

pub mod client;

pub use client::{BackendClient, BackendClientConfig};
