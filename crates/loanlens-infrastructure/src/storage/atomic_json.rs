//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe replacement of small state files such as
//! the persisted credential.

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

impl From<AtomicJsonError> for loanlens_core::LoanLensError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::IoError(e) => e.into(),
            AtomicJsonError::JsonError(e) => e.into(),
            AtomicJsonError::LockError(message) => loanlens_core::LoanLensError::io(message),
        }
    }
}

/// A handle to a JSON file that is replaced atomically.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: File locking prevents concurrent modifications
/// - **Durability**: Explicit fsync before rename
/// - **Privacy**: Files are created with 600 permissions on Unix
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

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
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

    /// Saves data to the file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let _lock = FileLock::acquire(&self.path)?;

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = create_private(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<(), AtomicJsonError> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Gets a temporary file path for atomic writes.
    fn get_temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

fn create_private(path: &Path) -> Result<File, std::io::Error> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path)
}

/// A file lock guard that releases the lock when dropped.
///
/// The lock file itself stays on disk: unlinking it while held would let a
/// later process lock a fresh inode while another still waits on the old one.
struct FileLock {
    _file: File,
}

impl FileLock {
    /// Acquires an exclusive lock next to the given path.
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
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
                .map_err(|e| AtomicJsonError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestState {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestState>::new(temp_dir.path().join("state.json"));

        let state = TestState {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&state).unwrap();

        assert_eq!(file.load().unwrap(), Some(state));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestState>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        let file = AtomicJsonFile::<TestState>::new(path.clone());

        file.save(&TestState {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".state.json.tmp").exists());
    }

    #[test]
    fn test_lock_file_is_kept_and_reused() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        let file = AtomicJsonFile::<TestState>::new(path);
        let lock_path = temp_dir.path().join("state.lock");

        file.save(&TestState {
            name: "first".to_string(),
            count: 1,
        })
        .unwrap();
        assert!(lock_path.exists());

        file.save(&TestState {
            name: "second".to_string(),
            count: 2,
        })
        .unwrap();
        assert!(lock_path.exists());
        assert_eq!(file.load().unwrap().unwrap().name, "second");
    }

    #[test]
    fn test_concurrent_writers_leave_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let writers: Vec<_> = (0..4)
            .map(|id| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let file = AtomicJsonFile::<TestState>::new(path);
                    for count in 0..10 {
                        file.save(&TestState {
                            name: format!("writer-{id}"),
                            count,
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let state = AtomicJsonFile::<TestState>::new(path).load().unwrap().unwrap();
        assert!(state.name.starts_with("writer-"));
        assert_eq!(state.count, 9);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        let file = AtomicJsonFile::<TestState>::new(path.clone());

        file.save(&TestState {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();
        file.remove().unwrap();
        file.remove().unwrap();
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        let file = AtomicJsonFile::<TestState>::new(path.clone());
        file.save(&TestState {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
