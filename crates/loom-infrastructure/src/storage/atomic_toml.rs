//! Atomic TOML file operations.
//!
//! Writes go to a sibling temp file that is fsynced and renamed over the
//! target. Read-modify-write cycles hold an exclusive lock file.

use loom_core::error::{LoomError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to one TOML file holding a `T`.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
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

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
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

    /// Like [`AtomicTomlFile::load`], but a missing, empty or unparsable file
    /// yields `T::default()`. Parse failures are logged; I/O failures are not
    /// swallowed.
    pub fn load_or_default(&self) -> Result<T>
    where
        T: Default,
    {
        match self.load() {
            Ok(data) => Ok(data.unwrap_or_default()),
            Err(e) if e.is_serialization() => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable TOML file: {}", e);
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Serializes `data` and atomically replaces the file.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Locked read-modify-write. Missing or unparsable content starts from
    /// `T::default()`.
    pub fn update<F>(&self, apply: F) -> Result<T>
    where
        T: Default,
        F: FnOnce(&mut T),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut data = self.load_or_default()?;
        apply(&mut data);
        self.save(&data)?;
        Ok(data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| LoomError::io(format!("{} has no parent directory", self.path.display())))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| LoomError::io(format!("{} has no file name", self.path.display())))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock on `<file>.lock`, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
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
            file.lock_exclusive()
                .map_err(|e| LoomError::io(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Best effort; the OS lock goes away with the handle anyway.
        let _ = fs::remove_file(&self.lock_path);
    }
}
