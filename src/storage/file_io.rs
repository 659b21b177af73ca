//! Table file access and the data directory lock
//!
//! Table files are only ever replaced whole: the new contents go to a staging
//! file beside the old one, which is then renamed over it. A reader in another
//! process therefore sees either the previous or the next version.
//!
//! Writers take [`DirLock`] and re-read the tables before mutating them, so a
//! process never writes back a stale snapshot over rows another process has
//! committed in the meantime.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{SeatbookError, SeatbookResult};

/// Exclusive advisory lock on the data directory, released on drop
#[derive(Debug)]
pub struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    /// Block until this handle owns the lock file at `path`.
    ///
    /// Every acquisition opens its own handle, so two threads of one process
    /// exclude each other the same way two processes do. Not reentrant.
    pub fn acquire(path: impl Into<PathBuf>) -> SeatbookResult<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| storage_error("open lock file", &path, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| storage_error("lock", &path, e))?;
        debug!(lock = %path.display(), "data directory locked");

        Ok(Self { file, path })
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        // Closing the handle releases the lock even if this fails
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(lock = %self.path.display(), error = %e, "failed to unlock data directory");
        }
    }
}

/// What `seatbook config` reports for a table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFileState {
    Missing,
    Valid,
    Corrupt,
}

impl fmt::Display for TableFileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Valid => write!(f, "ok"),
            Self::Corrupt => write!(f, "corrupt"),
        }
    }
}

/// Inspect a table file without loading it into a table
pub fn table_file_state(path: &Path) -> TableFileState {
    match fs::read(path) {
        Ok(bytes) if serde_json::from_slice::<serde_json::Value>(&bytes).is_ok() => {
            TableFileState::Valid
        }
        Err(e) if e.kind() == ErrorKind::NotFound => TableFileState::Missing,
        _ => TableFileState::Corrupt,
    }
}

/// Read a table file; a file that was never written reads as `T::default()`
pub fn read_table_file<T>(path: &Path) -> SeatbookResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace a table file with `data` via a staging file and rename
pub fn replace_table_file<T: Serialize>(path: &Path, data: &T) -> SeatbookResult<()> {
    let bytes =
        serde_json::to_vec_pretty(data).map_err(|e| storage_error("serialize", path, e))?;
    let staging = staging_path(path);

    let written = write_and_sync(&staging, &bytes).and_then(|()| fs::rename(&staging, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(storage_error("replace", path, e));
    }

    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `seats.json` -> `seats.json.<pid>.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn storage_error(action: &str, path: &Path, err: impl fmt::Display) -> SeatbookError {
    SeatbookError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Rows {
        rows: Vec<u32>,
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seats.json");

        let rows: Rows = read_table_file(&path).unwrap();
        assert_eq!(rows, Rows::default());
        assert_eq!(table_file_state(&path), TableFileState::Missing);
    }

    #[test]
    fn test_replace_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seats.json");

        replace_table_file(&path, &Rows { rows: vec![1, 2] }).unwrap();
        replace_table_file(&path, &Rows { rows: vec![3] }).unwrap();

        assert_eq!(read_table_file::<Rows>(&path).unwrap().rows, vec![3]);
        assert_eq!(table_file_state(&path), TableFileState::Valid);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_staging_path_sits_beside_target() {
        let path = Path::new("/data/seats.json");
        let staging = staging_path(path);

        assert_eq!(staging.parent(), path.parent());
        assert!(staging.to_string_lossy().ends_with(".tmp"));
    }

    #[test]
    fn test_unparseable_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_table_file::<Rows>(&path).unwrap_err();
        assert!(matches!(err, SeatbookError::Storage(_)));
        assert!(err.is_retryable());
        assert_eq!(table_file_state(&path), TableFileState::Corrupt);
        assert_eq!(TableFileState::Corrupt.to_string(), "corrupt");
    }

    #[test]
    fn test_dir_lock_excludes_second_holder() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join(".lock");
        let released = AtomicBool::new(false);
        let (locked_tx, locked_rx) = mpsc::channel();

        thread::scope(|s| {
            let (lock_path, released) = (&lock_path, &released);
            s.spawn(move || {
                let _lock = DirLock::acquire(lock_path).unwrap();
                locked_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(50));
                released.store(true, Ordering::SeqCst);
            });

            locked_rx.recv().unwrap();
            let _lock = DirLock::acquire(lock_path).unwrap();
            assert!(released.load(Ordering::SeqCst));
        });
    }
}
