use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use certdesk_core::error::{CertdeskError, Result};
use certdesk_core::session::{KeyValueStore, StoreOp};

/// Process-local [`KeyValueStore`]. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. to simulate data left by a previous run.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Copy of every entry, in key order.
    pub fn entries(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| CertdeskError::storage(format!("Memory store poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let entries = self.lock()?;
        Ok(keys.iter().map(|key| entries.get(*key).cloned()).collect())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn apply(&self, ops: &[StoreOp]) -> Result<()> {
        let mut entries = self.lock()?;
        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    entries.insert(key.clone(), value.clone());
                }
                StoreOp::Remove { key } => {
                    entries.remove(key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_apply_batch() {
        let store = MemoryStore::with_entries([("stale", "x")]);
        store
            .apply(&[
                StoreOp::Set {
                    key: "k".into(),
                    value: "v".into(),
                },
                StoreOp::Remove {
                    key: "stale".into(),
                },
            ])
            .unwrap();
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }
}
