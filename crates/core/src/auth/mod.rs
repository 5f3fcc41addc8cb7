//! Account registration and login flows

pub mod ports;
pub mod service;

pub use ports::AuthGateway;
pub use service::AuthService;
