//! Domain records fetched from the remote API.
//!
//! These are never persisted locally; they are re-fetched every session.

mod certificate;
mod notice;

pub use certificate::Certificate;
pub use notice::{Notice, NoticeId};
