//! Atomic, lock-protected TOML documents.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use certdesk_core::error::{CertdeskError, Result};
use serde::{Serialize, de::DeserializeOwned};

/// A TOML document on disk, read and replaced as a whole.
///
/// - Writes go to a sibling temp file, are fsynced, then renamed over the
///   original, so readers see either the old or the new document.
/// - [`TomlFile::update`] holds an exclusive lock file for the whole
///   read-modify-write cycle so two processes cannot interleave updates.
pub struct TomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> TomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing or blank file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Replaces the document atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(rendered.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under an exclusive lock. `default_value` seeds a
    /// missing document.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CertdeskError::storage(format!("Not a file path: {}", self.path.display())))?;

        Ok(self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock held through a `<file>.lock` sibling; released on drop.
///
/// The lock file is never removed. Unlinking it would let a waiter hold the
/// lock on the old inode while a newcomer locks a fresh file.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                CertdeskError::storage(format!(
                    "Failed to lock {}: {}",
                    lock_path.display(),
                    e
                ))
            })?;
        }

        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        label: String,
        count: u32,
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let file = TomlFile::<Counter>::new(dir.path().join("absent.toml"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_seeds_and_accumulates() {
        let dir = TempDir::new().unwrap();
        let file = TomlFile::<Counter>::new(dir.path().join("nested").join("counter.toml"));
        let seed = Counter {
            label: "visits".to_string(),
            count: 0,
        };

        file.update(seed.clone(), |c| {
            c.count += 2;
            Ok(())
        })
        .unwrap();
        file.update(seed, |c| {
            c.count += 3;
            Ok(())
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap().count, 5);
        assert!(!dir.path().join("nested").join(".counter.toml.tmp").exists());
        assert!(dir.path().join("nested").join("counter.lock").exists());
    }

    #[test]
    fn test_failed_update_keeps_previous_document() {
        let dir = TempDir::new().unwrap();
        let file = TomlFile::<Counter>::new(dir.path().join("counter.toml"));
        let original = Counter {
            label: "keep".to_string(),
            count: 1,
        };
        file.save(&original).unwrap();

        let result = file.update(original.clone(), |c| {
            c.count = 99;
            Err(CertdeskError::internal("abort"))
        });

        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap(), original);
    }

    #[cfg(unix)]
    #[test]
    fn test_lock_stays_exclusive_after_handoff() {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let first = FileLock::acquire(&path).unwrap();

        let (second_tx, second_rx) = mpsc::channel();
        let second_path = path.clone();
        let second = thread::spawn(move || {
            let lock = FileLock::acquire(&second_path).unwrap();
            second_tx.send(()).unwrap();
            thread::sleep(Duration::from_millis(800));
            drop(lock);
        });

        thread::sleep(Duration::from_millis(100));
        drop(first);
        second_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        let (third_tx, third_rx) = mpsc::channel();
        let third_path = path.clone();
        let third = thread::spawn(move || {
            let _lock = FileLock::acquire(&third_path).unwrap();
            third_tx.send(()).unwrap();
        });

        assert!(
            third_rx.recv_timeout(Duration::from_millis(300)).is_err(),
            "third handle locked while the second still held the lock"
        );

        second.join().unwrap();
        third_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        third.join().unwrap();
        assert!(path.with_extension("lock").exists());
    }
}
