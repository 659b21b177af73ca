//! Reservation ledger
//!
//! Durable store of individual reservations. Lookups other than by id are
//! full-table scans; there are no secondary indexes.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{Reservation, ReservationId, YearMonth};

use super::table::JsonTable;

/// Append/delete store of reservation records
pub struct ReservationLedger {
    table: JsonTable<Reservation>,
}

impl ReservationLedger {
    /// Create a new ledger backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path),
        }
    }

    /// Load reservations from disk
    pub fn load(&self) -> SeatbookResult<()> {
        self.table.load()
    }

    /// Underlying table
    pub fn table(&self) -> &JsonTable<Reservation> {
        &self.table
    }

    /// Insert a new reservation; fails with `Conflict` if the id is taken
    pub fn insert(&self, reservation: Reservation) -> SeatbookResult<()> {
        self.table.insert_new(reservation)
    }

    /// Get a reservation by id
    pub fn get_by_id(&self, id: &ReservationId) -> SeatbookResult<Reservation> {
        self.table
            .get(id)?
            .ok_or_else(|| SeatbookError::reservation_not_found(id.as_str()))
    }

    /// Delete a reservation; fails with `NotFound` if absent
    pub fn delete(&self, id: &ReservationId) -> SeatbookResult<Reservation> {
        self.table
            .delete(id)?
            .ok_or_else(|| SeatbookError::reservation_not_found(id.as_str()))
    }

    /// Total seats booked on a date
    pub fn sum_seats_for_date(&self, date: NaiveDate) -> SeatbookResult<u64> {
        self.table.fold(0u64, |total, r| {
            if r.date == date {
                total + u64::from(r.seats)
            } else {
                total
            }
        })
    }

    /// Reservations for an email, newest date first
    pub fn list_by_email(&self, email: &str) -> SeatbookResult<Vec<Reservation>> {
        let mut reservations = self.table.scan(|r| r.email == email)?;
        reservations.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(reservations)
    }

    /// Reservations falling within a month, oldest date first
    pub fn list_by_month(&self, month: YearMonth) -> SeatbookResult<Vec<Reservation>> {
        let mut reservations = self.table.scan(|r| month.contains(r.date))?;
        reservations.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(reservations)
    }

    /// Number of reservations
    pub fn count(&self) -> SeatbookResult<usize> {
        self.table.len()
    }
}
