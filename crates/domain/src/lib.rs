//! # CoreShift Domain
//!
//! Business domain types and models for the CoreShift client core.
//!
//! This crate contains:
//! - Session and account types (User, Session)
//! - Profile and feedback wire types
//! - Domain error taxonomy and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other CoreShift crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
