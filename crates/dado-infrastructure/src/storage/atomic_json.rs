//! Atomic JSON file operations.
//!
//! Whole-document rewrites through a temp file and a rename, so a reader sees
//! either the previous document or the new one, never a mix.

use dado_core::DiceError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicJsonError {
    fn from(e: serde_json::Error) -> Self {
        AtomicJsonError::JsonError(e)
    }
}

impl From<AtomicJsonError> for DiceError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::IoError(io) => io.into(),
            AtomicJsonError::JsonError(json) => json.into(),
            AtomicJsonError::LockError(message) => DiceError::io(message),
        }
    }
}

/// A handle to a JSON document that is replaced atomically on save.
///
/// Provides:
/// - **Atomicity**: tmp file + rename
/// - **Isolation**: exclusive lock file held while writing
/// - **Durability**: explicit fsync before rename
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
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

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and replaces the file with it.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let _lock = FileLock::acquire(&self.path)?;

        let mut json = serde_json::to_string_pretty(data)?;
        json.push('\n');

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// `.history.json.tmp` beside `history.json`
    fn temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        use fs2::FileExt;

        let file_name = path.file_name().ok_or_else(|| {
            AtomicJsonError::LockError(format!("Path has no file name: {:?}", path))
        })?;
        // `.history.json.lock` never collides with the document itself
        let lock_path = path.with_file_name(format!(".{}.lock", file_name.to_string_lossy()));

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicJsonError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; the lock file itself is best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tally {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Tally>::new(temp_dir.path().join("tally.json"));

        let tally = Tally {
            name: "crits".to_string(),
            count: 3,
        };
        file.save(&tally).unwrap();

        assert_eq!(file.load().unwrap(), Some(tally));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Tally>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();

        let file = AtomicJsonFile::<Tally>::new(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{\"name\": ").unwrap();

        let file = AtomicJsonFile::<Tally>::new(path);
        assert!(matches!(file.load(), Err(AtomicJsonError::JsonError(_))));
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("tally.json");
        let file = AtomicJsonFile::<Tally>::new(path.clone());

        file.save(&Tally {
            name: "fumbles".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".tally.json.tmp").exists());
        assert!(!temp_dir.path().join("nested").join(".tally.json.lock").exists());
    }

    #[test]
    fn test_lock_file_never_shadows_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tally.lock");
        let file = AtomicJsonFile::<Tally>::new(path.clone());

        let tally = Tally {
            name: "locked".to_string(),
            count: 2,
        };
        file.save(&tally).unwrap();

        assert!(path.exists());
        assert_eq!(file.load().unwrap(), Some(tally));
        assert!(!temp_dir.path().join(".tally.lock.lock").exists());
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Tally>::new(temp_dir.path().join("tally.json"));

        for count in 1..=3 {
            file.save(&Tally {
                name: "rolls".to_string(),
                count,
            })
            .unwrap();
        }

        assert_eq!(file.load().unwrap().unwrap().count, 3);
    }

    #[test]
    fn test_error_conversion() {
        let err: DiceError = AtomicJsonError::LockError("busy".to_string()).into();
        assert!(err.is_io());

        let json_err = serde_json::from_str::<Tally>("[").unwrap_err();
        let err: DiceError = AtomicJsonError::JsonError(json_err).into();
        assert!(err.is_serialization());
    }
}
