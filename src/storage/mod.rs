//! Storage layer for Seatbook
//!
//! Five flat tables, each a JSON file written atomically on every change:
//! reservations (keyed by id), seat overrides and holiday overrides (keyed by
//! date), and the singleton default seat and default holiday records. There
//! are no transactions across tables.
//!
//! Every mutation runs inside [`Storage::write_locked`]: the data directory
//! lock is held while the tables are re-read from disk, checked and written,
//! so concurrent processes never overwrite each other's committed rows.

pub mod admission;
pub mod file_io;
pub mod init;
pub mod reservations;
pub mod table;

pub use admission::AdmissionGate;
pub use file_io::{table_file_state, DirLock, TableFileState};
pub use init::{initialize_storage, seed_sample_data};
pub use reservations::ReservationLedger;
pub use table::{JsonTable, TableRow};

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SeatbookPaths;
use crate::error::SeatbookError;
use crate::models::{DefaultHolidayConfig, DefaultSeatConfig, HolidayOverride, SeatOverride};

/// Main storage coordinator that provides access to all tables
pub struct Storage {
    paths: SeatbookPaths,
    pub reservations: ReservationLedger,
    pub seats: JsonTable<SeatOverride>,
    pub holidays: JsonTable<HolidayOverride>,
    pub default_seat: JsonTable<DefaultSeatConfig>,
    pub default_holiday: JsonTable<DefaultHolidayConfig>,
    pub admission: AdmissionGate,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance with empty in-memory tables
    pub fn new(paths: SeatbookPaths) -> Result<Self, SeatbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            reservations: ReservationLedger::new(paths.reservations_file()),
            seats: JsonTable::new(paths.seats_file()),
            holidays: JsonTable::new(paths.holidays_file()),
            default_seat: JsonTable::new(paths.default_seat_file()),
            default_holiday: JsonTable::new(paths.default_holiday_file()),
            admission: AdmissionGate::new(),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create storage and load every table from disk
    pub fn open(paths: SeatbookPaths) -> Result<Self, SeatbookError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SeatbookPaths {
        &self.paths
    }

    /// Audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all tables from disk
    pub fn load_all(&self) -> Result<(), SeatbookError> {
        self.reservations.load()?;
        self.seats.load()?;
        self.holidays.load()?;
        self.default_seat.load()?;
        self.default_holiday.load()?;
        Ok(())
    }

    /// Write all tables to disk, creating missing files
    pub fn save_all(&self) -> Result<(), SeatbookError> {
        self.reservations.table().save()?;
        self.seats.save()?;
        self.holidays.save()?;
        self.default_seat.save()?;
        self.default_holiday.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Run a mutation under the data directory lock on freshly loaded tables.
    ///
    /// Must not be nested: the lock is not reentrant.
    pub fn write_locked<T, F>(&self, f: F) -> Result<T, SeatbookError>
    where
        F: FnOnce() -> Result<T, SeatbookError>,
    {
        let _lock = DirLock::acquire(self.paths.lock_file())?;
        self.load_all()?;
        f()
    }

    /// Append audit entries for changes that are already committed.
    ///
    /// Failures are logged and never undo or fail the change itself.
    pub fn record(&self, entries: &[AuditEntry]) {
        if let Err(e) = self.audit.log_batch(entries) {
            warn!(
                error = %e,
                entries = entries.len(),
                log = %self.audit.path().display(),
                "audit entry not written"
            );
        }
    }

    /// Record a created row in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        row: &T,
    ) {
        self.record(&[AuditEntry::create(entity_type, entity_id, row)]);
    }

    /// Record a replaced row in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) {
        self.record(&[AuditEntry::update(
            entity_type,
            entity_id,
            before,
            after,
            summary,
        )]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert_eq!(storage.reservations.count().unwrap(), 0);
    }

    #[test]
    fn test_save_all_creates_every_table_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths.clone()).unwrap();

        storage.save_all().unwrap();

        for file in paths.table_files() {
            assert_eq!(table_file_state(&file), TableFileState::Valid, "{}", file.display());
        }
    }

    #[test]
    fn test_reload_sees_committed_rows() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

        {
            let storage = Storage::open(paths.clone()).unwrap();
            storage.seats.put(SeatOverride::new(date, 5)).unwrap();
            storage.default_seat.put(DefaultSeatConfig::new(10)).unwrap();
        }

        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.seats.get(&date).unwrap().unwrap().seats, 5);
        assert_eq!(
            storage.default_seat.get(&"default".to_string()).unwrap().unwrap().seats,
            10
        );
    }

    #[test]
    fn test_audit_helpers() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let row = DefaultSeatConfig::new(10);
        storage.log_create(EntityType::DefaultSeat, "default", &row);
        storage.log_update(EntityType::DefaultSeat, "default", &row, &row, None);

        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }

    #[test]
    fn test_write_locked_rereads_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let first = Storage::open(paths.clone()).unwrap();
        let second = Storage::open(paths.clone()).unwrap();
        let date = |day| NaiveDate::from_ymd_opt(2024, 7, day).unwrap();

        first
            .write_locked(|| first.seats.put(SeatOverride::new(date(15), 5)))
            .unwrap();
        // `second` was opened before the first write and must not drop it
        second
            .write_locked(|| second.seats.put(SeatOverride::new(date(16), 7)))
            .unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.seats.len().unwrap(), 2);
        assert_eq!(reopened.seats.get(&date(15)).unwrap().unwrap().seats, 5);
    }

    #[test]
    fn test_write_locked_releases_lock_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let err = storage
            .write_locked::<(), _>(|| Err(SeatbookError::invalid("rejected")))
            .unwrap_err();
        assert!(err.is_invalid_input());

        storage.write_locked(|| Ok(())).unwrap();
    }

    #[test]
    fn test_record_survives_unwritable_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir_all(paths.audit_log()).unwrap();
        let storage = Storage::open(paths).unwrap();

        storage.log_create(EntityType::DefaultSeat, "default", &DefaultSeatConfig::new(10));

        assert!(storage.audit().entry_count().is_err());
    }
}
