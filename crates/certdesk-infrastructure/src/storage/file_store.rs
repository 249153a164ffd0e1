//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use certdesk_core::error::Result;
use certdesk_core::session::{KeyValueStore, StoreOp};
use serde::{Deserialize, Serialize};

use super::toml_file::TomlFile;

/// On-disk layout: a single `[entries]` table of string pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// [`KeyValueStore`] persisted to a TOML file, surviving restarts.
///
/// Every write is a locked read-modify-write of the whole document, so a
/// batch passed to [`KeyValueStore::apply`] lands in one atomic rename.
pub struct FileStore {
    file: TomlFile<StoreDocument>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        tracing::debug!("[FileStore] Using store file: {}", path.display());
        Self {
            file: TomlFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.file.load()?.unwrap_or_default().entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.apply(&[StoreOp::Set {
            key: key.to_string(),
            value: value.to_string(),
        }])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.apply(&[StoreOp::Remove {
            key: key.to_string(),
        }])
    }

    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let mut entries = self.read()?;
        Ok(keys.iter().map(|key| entries.remove(*key)).collect())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read()?.into_keys().collect())
    }

    fn apply(&self, ops: &[StoreOp]) -> Result<()> {
        self.file.update(StoreDocument::default(), |doc| {
            for op in ops {
                match op {
                    StoreOp::Set { key, value } => {
                        doc.entries.insert(key.clone(), value.clone());
                    }
                    StoreOp::Remove { key } => {
                        doc.entries.remove(key);
                    }
                }
            }
            Ok(())
        })
    }
}
