//! Capacity resolution
//!
//! Effective capacity for a date is its seat override if present, else the
//! default seat count, else 0.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::SeatbookResult;
use crate::models::{DayCapacity, DefaultSeatConfig, SeatOverride, YearMonth, DEFAULT_KEY};
use crate::storage::Storage;

use super::capacity_from;

/// Resolves and updates per-date seat capacity
pub struct CapacityResolver<'a> {
    storage: &'a Storage,
}

impl<'a> CapacityResolver<'a> {
    /// Create a new capacity resolver
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Seat capacity applied to `date`; missing data resolves to 0
    pub fn effective_capacity(&self, date: NaiveDate) -> SeatbookResult<u32> {
        if let Some(row) = self.storage.seats.get(&date)? {
            return Ok(row.seats);
        }
        Ok(self.default_seats()?.unwrap_or(0))
    }

    /// The default seat count, if one has been set
    pub fn default_seats(&self) -> SeatbookResult<Option<u32>> {
        Ok(self
            .storage
            .default_seat
            .get(&DEFAULT_KEY.to_string())?
            .map(|row| row.seats))
    }

    /// The override for a date, if any
    pub fn get_override(&self, date: NaiveDate) -> SeatbookResult<Option<SeatOverride>> {
        self.storage.seats.get(&date)
    }

    /// Set the capacity for one date, replacing any previous override
    pub fn set_override(&self, date: NaiveDate, seats: i64) -> SeatbookResult<SeatOverride> {
        let seats = capacity_from(seats)?;
        let row = SeatOverride::new(date, seats);

        let previous = self.storage.write_locked(|| self.storage.seats.put(row))?;
        match previous {
            Some(before) => self.storage.log_update(
                EntityType::SeatOverride,
                date.to_string(),
                &before,
                &row,
                Some(format!("seats: {} -> {}", before.seats, seats)),
            ),
            None => self
                .storage
                .log_create(EntityType::SeatOverride, date.to_string(), &row),
        }

        info!(%date, seats, "seat override set");
        Ok(row)
    }

    /// Set the capacity used for dates without an override
    pub fn set_default(&self, seats: i64) -> SeatbookResult<DefaultSeatConfig> {
        let seats = capacity_from(seats)?;
        let row = DefaultSeatConfig::new(seats);

        let previous = self
            .storage
            .write_locked(|| self.storage.default_seat.put(row.clone()))?;
        match previous {
            Some(before) => self.storage.log_update(
                EntityType::DefaultSeat,
                DEFAULT_KEY,
                &before,
                &row,
                Some(format!("seats: {} -> {}", before.seats, seats)),
            ),
            None => self
                .storage
                .log_create(EntityType::DefaultSeat, DEFAULT_KEY, &row),
        }

        info!(seats, "default seats set");
        Ok(row)
    }

    /// Effective capacity for every day of a month, ascending
    pub fn month_capacities(&self, month: YearMonth) -> SeatbookResult<Vec<DayCapacity>> {
        let default = self.default_seats()?.unwrap_or(0);
        let overrides = self.storage.seats.scan(|row| month.contains(row.date))?;

        Ok(month
            .days()
            .map(|date| {
                let seats = overrides
                    .iter()
                    .find(|row| row.date == date)
                    .map_or(default, |row| row.seats);
                DayCapacity { date, seats }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SeatbookPaths;
    use crate::error::SeatbookError;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn july(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    #[test]
    fn test_no_data_resolves_to_zero() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);

        assert_eq!(resolver.effective_capacity(july(1)).unwrap(), 0);
        assert!(resolver.default_seats().unwrap().is_none());
    }

    #[test]
    fn test_override_takes_precedence_over_default() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);

        resolver.set_default(10).unwrap();
        resolver.set_override(july(15), 5).unwrap();

        assert_eq!(resolver.effective_capacity(july(15)).unwrap(), 5);
        assert_eq!(resolver.effective_capacity(july(16)).unwrap(), 10);
    }

    #[test]
    fn test_override_without_default() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);

        resolver.set_override(july(15), 3).unwrap();

        assert_eq!(resolver.effective_capacity(july(15)).unwrap(), 3);
        assert_eq!(resolver.effective_capacity(july(16)).unwrap(), 0);
    }

    #[test]
    fn test_zero_override_closes_a_day() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);

        resolver.set_default(10).unwrap();
        resolver.set_override(july(4), 0).unwrap();

        assert_eq!(resolver.effective_capacity(july(4)).unwrap(), 0);
    }

    #[test]
    fn test_writes_are_visible_immediately() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);

        resolver.set_override(july(15), 5).unwrap();
        resolver.set_override(july(15), 8).unwrap();
        assert_eq!(resolver.effective_capacity(july(15)).unwrap(), 8);

        resolver.set_default(4).unwrap();
        resolver.set_default(6).unwrap();
        assert_eq!(resolver.effective_capacity(july(16)).unwrap(), 6);
    }

    #[test]
    fn test_negative_seats_rejected_without_mutation() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);
        resolver.set_default(10).unwrap();

        let err = resolver.set_override(july(15), -1).unwrap_err();
        assert!(matches!(err, SeatbookError::InvalidInput(_)));
        assert!(resolver.get_override(july(15)).unwrap().is_none());

        assert!(resolver.set_default(-5).unwrap_err().is_invalid_input());
        assert_eq!(resolver.default_seats().unwrap(), Some(10));
    }

    #[test]
    fn test_changes_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);

        resolver.set_override(july(15), 5).unwrap();
        resolver.set_override(july(15), 7).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].summary.as_deref(), Some("seats: 5 -> 7"));
    }

    #[test]
    fn test_month_capacities() {
        let (_temp_dir, storage) = create_test_storage();
        let resolver = CapacityResolver::new(&storage);
        resolver.set_default(10).unwrap();
        resolver.set_override(july(15), 5).unwrap();
        resolver
            .set_override(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), 1)
            .unwrap();

        let days = resolver
            .month_capacities(YearMonth::new(2024, 7).unwrap())
            .unwrap();

        assert_eq!(days.len(), 31);
        assert_eq!(days[0], DayCapacity { date: july(1), seats: 10 });
        assert_eq!(days[14], DayCapacity { date: july(15), seats: 5 });
        assert!(days.iter().filter(|d| d.seats == 10).count() == 30);
    }

    #[test]
    fn test_unwritable_audit_log_does_not_fail_committed_write() {
        let (temp_dir, storage) = create_test_storage();
        std::fs::create_dir_all(temp_dir.path().join("audit.log")).unwrap();
        let resolver = CapacityResolver::new(&storage);

        resolver.set_default(10).unwrap();
        resolver.set_override(july(15), 5).unwrap();

        assert_eq!(resolver.effective_capacity(july(15)).unwrap(), 5);
        assert_eq!(resolver.effective_capacity(july(16)).unwrap(), 10);
    }
}
