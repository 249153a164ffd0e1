//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Session` value (identity, collections, sync status)
//! - `state`: `SessionState`, the shared owner with change notification
//! - `storage`: the `KeyValueStore` port and the namespaced session record
//!
//! # Usage
//!
//! ```ignore
//! use certdesk_core::session::{Session, SessionState, SessionStorage, SyncStatus};
//! ```

mod model;
mod state;
mod storage;

pub use model::{Session, SyncPayload, SyncStatus};
pub use state::SessionState;
pub use storage::{KeyValueStore, PersistedSession, SessionStorage, StoreOp, keys};
