//! Flat key/value table persisted to a JSON file
//!
//! Every logical table (reservations, seat overrides, holiday overrides and
//! the two singleton defaults) is a `JsonTable`. Rows are held in memory and
//! every write goes straight through to disk; a write that cannot be
//! persisted is rolled back in memory and surfaces as a storage error, so
//! readers never observe state that is not on disk.
//!
//! A table only knows its own snapshot. Mutations that may race with another
//! process go through [`Storage::write_locked`], which re-reads every table
//! under the data directory lock first.
//!
//! [`Storage::write_locked`]: super::Storage::write_locked

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{
    DefaultHolidayConfig, DefaultSeatConfig, HolidayOverride, Reservation, ReservationId,
    SeatOverride,
};

use super::file_io::{read_table_file, replace_table_file};

/// A row type stored in a [`JsonTable`]
pub trait TableRow: Clone + Serialize + DeserializeOwned {
    /// Primary key; rows are kept in key order
    type Key: Ord + Clone + fmt::Display;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn key(&self) -> Self::Key;
}

impl TableRow for Reservation {
    type Key = ReservationId;
    const ENTITY: &'static str = "Reservation";

    fn key(&self) -> ReservationId {
        self.id.clone()
    }
}

impl TableRow for SeatOverride {
    type Key = NaiveDate;
    const ENTITY: &'static str = "SeatOverride";

    fn key(&self) -> NaiveDate {
        self.date
    }
}

impl TableRow for HolidayOverride {
    type Key = NaiveDate;
    const ENTITY: &'static str = "HolidayOverride";

    fn key(&self) -> NaiveDate {
        self.date
    }
}

impl TableRow for DefaultSeatConfig {
    type Key = String;
    const ENTITY: &'static str = "DefaultSeatConfig";

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl TableRow for DefaultHolidayConfig {
    type Key = String;
    const ENTITY: &'static str = "DefaultHolidayConfig";

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// On-disk layout of a table file
#[derive(Debug, Serialize, Deserialize)]
struct TableFile<V> {
    rows: Vec<V>,
}

impl<V> Default for TableFile<V> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

/// A durable table with per-key get/put/delete and full scans
pub struct JsonTable<V: TableRow> {
    path: PathBuf,
    rows: RwLock<BTreeMap<V::Key, V>>,
}

impl<V: TableRow> JsonTable<V> {
    /// Create an empty table backed by `path`; call [`load`](Self::load) to read it
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load rows from disk, replacing anything in memory
    pub fn load(&self) -> SeatbookResult<()> {
        let file: TableFile<V> = read_table_file(&self.path)?;

        let mut rows = self.write_rows()?;
        rows.clear();
        for row in file.rows {
            rows.insert(row.key(), row);
        }

        Ok(())
    }

    /// Write the current rows to disk (creates the file if missing)
    pub fn save(&self) -> SeatbookResult<()> {
        let rows = self.read_rows()?;
        self.persist(&rows)
    }

    /// Get a row by key
    pub fn get(&self, key: &V::Key) -> SeatbookResult<Option<V>> {
        Ok(self.read_rows()?.get(key).cloned())
    }

    /// Insert or replace a row, returning the previous value
    pub fn put(&self, row: V) -> SeatbookResult<Option<V>> {
        let mut rows = self.write_rows()?;
        let key = row.key();
        let previous = rows.insert(key.clone(), row);

        if let Err(e) = self.persist(&rows) {
            match &previous {
                Some(old) => rows.insert(key, old.clone()),
                None => rows.remove(&key),
            };
            return Err(e);
        }

        Ok(previous)
    }

    /// Insert a row whose key must not exist yet
    pub fn insert_new(&self, row: V) -> SeatbookResult<()> {
        let mut rows = self.write_rows()?;
        let key = row.key();

        if rows.contains_key(&key) {
            return Err(SeatbookError::Conflict {
                entity_type: V::ENTITY,
                identifier: key.to_string(),
            });
        }

        rows.insert(key.clone(), row);
        if let Err(e) = self.persist(&rows) {
            rows.remove(&key);
            return Err(e);
        }

        Ok(())
    }

    /// Delete a row, returning it if it existed
    pub fn delete(&self, key: &V::Key) -> SeatbookResult<Option<V>> {
        let mut rows = self.write_rows()?;

        let Some(removed) = rows.remove(key) else {
            return Ok(None);
        };

        if let Err(e) = self.persist(&rows) {
            rows.insert(key.clone(), removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    /// Full-table scan returning every row matching the predicate, in key order
    pub fn scan<F>(&self, predicate: F) -> SeatbookResult<Vec<V>>
    where
        F: Fn(&V) -> bool,
    {
        Ok(self
            .read_rows()?
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect())
    }

    /// Fold over every row without cloning
    pub fn fold<T, F>(&self, init: T, f: F) -> SeatbookResult<T>
    where
        F: Fn(T, &V) -> T,
    {
        Ok(self.read_rows()?.values().fold(init, f))
    }

    /// All rows in key order
    pub fn all(&self) -> SeatbookResult<Vec<V>> {
        self.scan(|_| true)
    }

    /// Number of rows
    pub fn len(&self) -> SeatbookResult<usize> {
        Ok(self.read_rows()?.len())
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> SeatbookResult<bool> {
        Ok(self.read_rows()?.is_empty())
    }

    fn persist(&self, rows: &BTreeMap<V::Key, V>) -> SeatbookResult<()> {
        let file = TableFile {
            rows: rows.values().cloned().collect(),
        };
        replace_table_file(&self.path, &file)
    }

    fn read_rows(&self) -> SeatbookResult<RwLockReadGuard<'_, BTreeMap<V::Key, V>>> {
        self.rows
            .read()
            .map_err(|e| SeatbookError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_rows(&self) -> SeatbookResult<RwLockWriteGuard<'_, BTreeMap<V::Key, V>>> {
        self.rows
            .write()
            .map_err(|e| SeatbookError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    fn create_test_table() -> (TempDir, JsonTable<SeatOverride>) {
        let temp_dir = TempDir::new().unwrap();
        let table = JsonTable::new(temp_dir.path().join("seats.json"));
        table.load().unwrap();
        (temp_dir, table)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, table) = create_test_table();
        assert!(table.is_empty().unwrap());
        assert!(table.get(&date(1)).unwrap().is_none());
    }

    #[test]
    fn test_put_is_upsert() {
        let (_temp_dir, table) = create_test_table();

        assert!(table.put(SeatOverride::new(date(15), 5)).unwrap().is_none());
        let previous = table.put(SeatOverride::new(date(15), 8)).unwrap();

        assert_eq!(previous, Some(SeatOverride::new(date(15), 5)));
        assert_eq!(table.get(&date(15)).unwrap().unwrap().seats, 8);
        assert_eq!(table.len().unwrap(), 1);
    }

    #[test]
    fn test_writes_are_durable() {
        let (temp_dir, table) = create_test_table();
        table.put(SeatOverride::new(date(15), 5)).unwrap();
        table.put(SeatOverride::new(date(16), 7)).unwrap();
        table.delete(&date(16)).unwrap();

        let reopened: JsonTable<SeatOverride> = JsonTable::new(temp_dir.path().join("seats.json"));
        reopened.load().unwrap();

        assert_eq!(reopened.all().unwrap(), vec![SeatOverride::new(date(15), 5)]);
    }

    #[test]
    fn test_insert_new_conflict() {
        let (_temp_dir, table) = create_test_table();
        table.insert_new(SeatOverride::new(date(15), 5)).unwrap();

        let err = table.insert_new(SeatOverride::new(date(15), 9)).unwrap_err();
        assert!(matches!(err, SeatbookError::Conflict { entity_type: "SeatOverride", .. }));
        assert_eq!(table.get(&date(15)).unwrap().unwrap().seats, 5);
    }

    #[test]
    fn test_delete_missing_returns_none() {
        let (_temp_dir, table) = create_test_table();
        assert!(table.delete(&date(3)).unwrap().is_none());
    }

    #[test]
    fn test_scan_in_key_order() {
        let (_temp_dir, table) = create_test_table();
        for (day, seats) in [(20, 1), (3, 2), (11, 3)] {
            table.put(SeatOverride::new(date(day), seats)).unwrap();
        }

        let rows = table.scan(|row| row.seats >= 2).unwrap();
        assert_eq!(rows.iter().map(|r| r.date).collect::<Vec<_>>(), vec![date(3), date(11)]);

        let total = table.fold(0, |acc, row| acc + row.seats).unwrap();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_failed_write_is_rolled_back() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("seats.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let table: JsonTable<SeatOverride> = JsonTable::new(path);
        let err = table.put(SeatOverride::new(date(15), 5)).unwrap_err();

        assert!(err.is_retryable());
        assert!(table.get(&date(15)).unwrap().is_none());
    }
}
