//! Persistent key-value store port and the session record mapped onto it.

use std::sync::Arc;

use crate::error::Result;
use crate::user::SessionUser;

/// Keys of the persisted session record, relative to the store namespace.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const NAME: &str = "name";
    pub const ROLE: &str = "role";
    pub const MODALITY: &str = "modality";
    pub const AVATAR_URL: &str = "avatarUrl";
}

/// A single write against a [`KeyValueStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Set { key: String, value: String },
    Remove { key: String },
}

/// Durable string-to-string storage that survives restarts.
///
/// Operations are synchronous so the session controller can update the store
/// and the in-memory session without a suspension point in between.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Reads several keys from one consistent view of the store. Implementations
    /// backed by a single file should override this to read once; the default
    /// reads each key in turn.
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Lists every key currently stored, including keys owned by other modules.
    fn keys(&self) -> Result<Vec<String>>;

    /// Applies several writes. Implementations backed by a single file should
    /// override this to write once; the default applies them in order.
    fn apply(&self, ops: &[StoreOp]) -> Result<()> {
        for op in ops {
            match op {
                StoreOp::Set { key, value } => self.set(key, value)?,
                StoreOp::Remove { key } => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// The persisted subset of the session. Collections are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub modality: Option<String>,
    pub avatar_url: Option<String>,
}

/// Maps the session record onto a namespaced region of a [`KeyValueStore`].
///
/// Keys are stored as `<namespace>.<key>`, and [`SessionStorage::clear`] removes
/// only keys under that prefix so data owned by other modules survives a logout.
#[derive(Clone)]
pub struct SessionStorage {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl SessionStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn key(&self, key: &str) -> String {
        format!("{}.{}", self.namespace, key)
    }

    fn set_or_remove(&self, key: &str, value: Option<&str>) -> StoreOp {
        match value {
            Some(value) => StoreOp::Set {
                key: self.key(key),
                value: value.to_string(),
            },
            None => StoreOp::Remove { key: self.key(key) },
        }
    }

    /// Loads the persisted record. Returns `None` when no token is stored.
    pub fn load(&self) -> Result<Option<PersistedSession>> {
        let record_keys = [
            keys::TOKEN,
            keys::NAME,
            keys::ROLE,
            keys::MODALITY,
            keys::AVATAR_URL,
        ]
        .map(|key| self.key(key));
        let record_keys: Vec<&str> = record_keys.iter().map(String::as_str).collect();

        let mut values = self.store.get_many(&record_keys)?.into_iter();
        let mut next = || values.next().flatten();

        let Some(token) = next() else {
            return Ok(None);
        };

        Ok(Some(PersistedSession {
            token,
            name: next(),
            role: next(),
            modality: next(),
            avatar_url: next(),
        }))
    }

    /// Writes a logged-in identity.
    ///
    /// Token, name and role are always written; modality and avatar are written
    /// when present and removed otherwise. A logged-out identity clears the
    /// namespace instead.
    pub fn save(&self, user: &SessionUser) -> Result<()> {
        let Some(record) = user.to_record() else {
            return self.clear();
        };

        let ops = vec![
            self.set_or_remove(keys::TOKEN, Some(&record.token)),
            self.set_or_remove(keys::NAME, Some(record.name.as_deref().unwrap_or_default())),
            self.set_or_remove(keys::ROLE, Some(record.role.as_deref().unwrap_or_default())),
            self.set_or_remove(keys::MODALITY, record.modality.as_deref()),
            self.set_or_remove(keys::AVATAR_URL, record.avatar_url.as_deref()),
        ];
        self.store.apply(&ops)
    }

    pub fn save_avatar_url(&self, avatar_url: Option<&str>) -> Result<()> {
        self.store
            .apply(&[self.set_or_remove(keys::AVATAR_URL, avatar_url)])
    }

    /// Removes every key in this namespace.
    pub fn clear(&self) -> Result<()> {
        let prefix = format!("{}.", self.namespace);
        let ops: Vec<StoreOp> = self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| StoreOp::Remove { key })
            .collect();

        if ops.is_empty() {
            return Ok(());
        }
        self.store.apply(&ops)
    }
}
