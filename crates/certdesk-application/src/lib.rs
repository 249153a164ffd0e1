//! Application layer for certdesk.
//!
//! Coordinates the session state, the persistent store and the remote API:
//! login and logout, restoring a stored session, and synchronizing the
//! role-specific collections after login.

pub mod auth_service;
pub mod data_sync_service;
pub mod session_controller;

pub use auth_service::AuthService;
pub use data_sync_service::DataSyncService;
pub use session_controller::SessionController;
