//! Path management for Seatbook
//!
//! Provides XDG-compliant path resolution for settings, table files, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `SEATBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/seatbook` or `~/.config/seatbook`
//! 3. Windows: `%APPDATA%\seatbook`

use std::path::PathBuf;

use crate::error::SeatbookError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SEATBOOK_DATA_DIR";

/// Manages all paths used by Seatbook
#[derive(Debug, Clone)]
pub struct SeatbookPaths {
    /// Base directory for all Seatbook data
    base_dir: PathBuf,
}

impl SeatbookPaths {
    /// Create a new SeatbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SeatbookError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SeatbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/seatbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding one file per table
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Reservations table, keyed by reservation id
    pub fn reservations_file(&self) -> PathBuf {
        self.data_dir().join("reservations.json")
    }

    /// Seat overrides table, keyed by date
    pub fn seats_file(&self) -> PathBuf {
        self.data_dir().join("seats.json")
    }

    /// Holiday overrides table, keyed by date
    pub fn holidays_file(&self) -> PathBuf {
        self.data_dir().join("holidays.json")
    }

    /// Singleton default seat record
    pub fn default_seat_file(&self) -> PathBuf {
        self.data_dir().join("default_seat.json")
    }

    /// Singleton default holiday record
    pub fn default_holiday_file(&self) -> PathBuf {
        self.data_dir().join("default_holiday.json")
    }

    /// Lock file serializing writers across processes
    pub fn lock_file(&self) -> PathBuf {
        self.data_dir().join(".lock")
    }

    /// All five table files, in a stable order
    pub fn table_files(&self) -> [PathBuf; 5] {
        [
            self.reservations_file(),
            self.seats_file(),
            self.holidays_file(),
            self.default_seat_file(),
            self.default_holiday_file(),
        ]
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SeatbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SeatbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SeatbookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Seatbook has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SeatbookError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                SeatbookError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("seatbook"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SeatbookError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SeatbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("seatbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_table_files_live_in_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        for file in paths.table_files() {
            assert_eq!(file.parent().unwrap(), paths.data_dir());
        }
        assert_eq!(
            paths.default_holiday_file(),
            temp_dir.path().join("data").join("default_holiday.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
