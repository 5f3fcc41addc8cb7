//! Profile fetch/create/update workflow

pub mod controller;
pub mod ports;

pub use controller::{ProfileController, ProfileState};
pub use ports::ProfileGateway;
