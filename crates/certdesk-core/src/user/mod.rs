//! User domain module.
//!
//! - `role`: the closed `Role` enum and its certificate feed mapping
//! - `model`: login payload, credentials and the session identity (`SessionUser`)

mod model;
mod role;

pub use model::{Credentials, LoginPayload, SessionUser, normalize_avatar_url};
pub use role::{CertificateFeed, CertificateTarget, Role};
