//! Session core for the certdesk client.
//!
//! Holds the domain model (session, user identity, fetched records), the ports
//! the application layer drives (`KeyValueStore`, `ApiClient`, `Navigator`) and
//! the navigation guard.

pub mod api;
pub mod config;
pub mod error;
pub mod records;
pub mod routing;
pub mod session;
pub mod user;

pub use error::{CertdeskError, Result};
