//! Per-date admission gate
//!
//! Serializes reservation admission for a single date: the capacity read, the
//! booked-seat sum and the insert run while holding that date's lock, so two
//! concurrent requests for the same day cannot both pass the capacity check.
//! Requests for different dates never contend for the same slot.
//!
//! The gate is in-process only; across processes the admission body also runs
//! under [`Storage::write_locked`](super::Storage::write_locked).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::error::{SeatbookError, SeatbookResult};

/// Registry of per-date locks
#[derive(Default)]
pub struct AdmissionGate {
    slots: Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>,
}

impl AdmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `date`
    pub fn with_date<T, F>(&self, date: NaiveDate, f: F) -> SeatbookResult<T>
    where
        F: FnOnce() -> SeatbookResult<T>,
    {
        let slot = {
            let mut slots = self.lock_slots()?;
            Arc::clone(slots.entry(date).or_default())
        };

        let result = {
            let _guard = slot.lock().map_err(|e| {
                SeatbookError::Storage(format!("Admission lock for {} poisoned: {}", date, e))
            })?;
            f()
        };

        // `f` may have committed; cleanup must not turn that into an error
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if Arc::strong_count(&slot) == 2 {
            slots.remove(&date);
        }

        result
    }

    /// Number of dates with an active or waiting admission
    pub fn active_dates(&self) -> SeatbookResult<usize> {
        Ok(self.lock_slots()?.len())
    }

    fn lock_slots(
        &self,
    ) -> SeatbookResult<MutexGuard<'_, HashMap<NaiveDate, Arc<Mutex<()>>>>> {
        self.slots
            .lock()
            .map_err(|e| SeatbookError::Storage(format!("Admission registry poisoned: {}", e)))
    }
}
