//! Storage initialization
//!
//! Creates the table files on first run and optionally loads a small sample
//! data set.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::audit::{AuditEntry, EntityType};
use crate::config::paths::SeatbookPaths;
use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{
    DefaultHolidayConfig, DefaultSeatConfig, HolidayOverride, Reservation, SeatOverride,
    DEFAULT_KEY,
};

use super::Storage;

/// Create the data directory and an empty file for every missing table
pub fn initialize_storage(paths: &SeatbookPaths) -> SeatbookResult<()> {
    paths.ensure_directories()?;

    let storage = Storage::new(paths.clone())?;
    storage.write_locked(|| {
        for file in paths.table_files() {
            if !file.exists() {
                tracing::info!(table = %file.display(), "creating table");
            }
        }
        // Existing rows were just loaded, so saving rewrites them unchanged
        storage.save_all()
    })
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SeatbookPaths) -> bool {
    paths.table_files().iter().any(|file| !file.exists())
}

/// Insert the sample data set, skipping rows that already exist.
///
/// Default capacity 10, Mondays and Sundays closed, 5 seats on 2024-07-15,
/// an extra holiday on 2024-07-17 and one booking of 2 seats on 2024-07-15.
/// Returns the number of rows written.
pub fn seed_sample_data(storage: &Storage) -> SeatbookResult<usize> {
    let entries = storage.write_locked(|| insert_missing_samples(storage))?;

    storage.record(&entries);
    tracing::info!(rows = entries.len(), "seeded sample data");

    Ok(entries.len())
}

fn insert_missing_samples(storage: &Storage) -> SeatbookResult<Vec<AuditEntry>> {
    let mut entries = Vec::new();

    if storage.default_seat.get(&DEFAULT_KEY.to_string())?.is_none() {
        let row = DefaultSeatConfig::new(10);
        storage.default_seat.put(row.clone())?;
        entries.push(AuditEntry::create(EntityType::DefaultSeat, DEFAULT_KEY, &row));
    }

    if storage.default_holiday.get(&DEFAULT_KEY.to_string())?.is_none() {
        let row = DefaultHolidayConfig::new([0, 6]);
        storage.default_holiday.put(row.clone())?;
        entries.push(AuditEntry::create(EntityType::DefaultHoliday, DEFAULT_KEY, &row));
    }

    let override_date = sample_date(15)?;
    if storage.seats.get(&override_date)?.is_none() {
        let row = SeatOverride::new(override_date, 5);
        storage.seats.put(row)?;
        entries.push(AuditEntry::create(
            EntityType::SeatOverride,
            override_date.to_string(),
            &row,
        ));
    }

    let holiday_date = sample_date(17)?;
    if storage.holidays.get(&holiday_date)?.is_none() {
        let row = HolidayOverride::new(holiday_date);
        storage.holidays.put(row)?;
        entries.push(AuditEntry::create(
            EntityType::HolidayOverride,
            holiday_date.to_string(),
            &row,
        ));
    }

    let reservation = Reservation {
        id: "sample-1".parse().map_err(|_| SeatbookError::invalid("sample id"))?,
        name: "テスト太郎".to_string(),
        email: "test@example.com".to_string(),
        date: override_date,
        seats: 2,
        created_at: Utc
            .with_ymd_and_hms(2024, 7, 1, 10, 0, 0)
            .single()
            .ok_or_else(|| SeatbookError::invalid("sample timestamp"))?,
    };
    if storage.reservations.table().get(&reservation.id)?.is_none() {
        storage.reservations.insert(reservation.clone())?;
        entries.push(AuditEntry::create(
            EntityType::Reservation,
            reservation.id.as_str(),
            &reservation,
        ));
    }

    Ok(entries)
}

fn sample_date(day: u32) -> SeatbookResult<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 7, day)
        .ok_or_else(|| SeatbookError::invalid(format!("sample date 2024-07-{:02}", day)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{table_file_state, TableFileState};
    use tempfile::TempDir;

    fn test_paths() -> (TempDir, SeatbookPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, paths)
    }

    #[test]
    fn test_initialize_storage() {
        let (_temp_dir, paths) = test_paths();
        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        for file in paths.table_files() {
            assert_eq!(table_file_state(&file), TableFileState::Valid);
        }
    }

    #[test]
    fn test_initialize_keeps_existing_rows() {
        let (_temp_dir, paths) = test_paths();
        {
            let storage = Storage::open(paths.clone()).unwrap();
            storage.default_seat.put(DefaultSeatConfig::new(42)).unwrap();
        }

        initialize_storage(&paths).unwrap();

        let storage = Storage::open(paths).unwrap();
        let row = storage.default_seat.get(&DEFAULT_KEY.to_string()).unwrap().unwrap();
        assert_eq!(row.seats, 42);
    }

    #[test]
    fn test_seed_sample_data() {
        let (_temp_dir, paths) = test_paths();
        let storage = Storage::open(paths).unwrap();

        assert_eq!(seed_sample_data(&storage).unwrap(), 5);

        let july_15 = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(storage.seats.get(&july_15).unwrap().unwrap().seats, 5);
        assert_eq!(storage.reservations.sum_seats_for_date(july_15).unwrap(), 2);
        assert_eq!(storage.audit().entry_count().unwrap(), 5);
    }

    #[test]
    fn test_seed_is_idempotent_and_never_overwrites() {
        let (_temp_dir, paths) = test_paths();
        let storage = Storage::open(paths).unwrap();
        storage.default_seat.put(DefaultSeatConfig::new(3)).unwrap();

        assert_eq!(seed_sample_data(&storage).unwrap(), 4);
        assert_eq!(seed_sample_data(&storage).unwrap(), 0);

        let row = storage.default_seat.get(&DEFAULT_KEY.to_string()).unwrap().unwrap();
        assert_eq!(row.seats, 3);
        assert_eq!(storage.reservations.count().unwrap(), 1);
    }

    #[test]
    fn test_seed_counts_rows_even_when_audit_log_unwritable() {
        let (temp_dir, paths) = test_paths();
        std::fs::create_dir_all(temp_dir.path().join("audit.log")).unwrap();
        let storage = Storage::open(paths).unwrap();

        assert_eq!(seed_sample_data(&storage).unwrap(), 5);
        assert_eq!(storage.holidays.len().unwrap(), 1);
    }
}
