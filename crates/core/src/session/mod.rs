//! Session store: single source of truth for "who is logged in and with
//! what credential", shared by every screen.

pub mod ports;
pub mod store;

pub use ports::SessionPersistence;
pub use store::SessionStore;
