//! Holiday resolution
//!
//! A date is a holiday iff it has a holiday override or its weekday is in the
//! default weekday set. There is no way to un-mark a date.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{DefaultHolidayConfig, HolidayOverride, YearMonth, DEFAULT_KEY, MAX_WEEKDAY};
use crate::storage::Storage;

/// Resolves and updates holiday status
pub struct HolidayResolver<'a> {
    storage: &'a Storage,
}

impl<'a> HolidayResolver<'a> {
    /// Create a new holiday resolver
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Whether `date` is a holiday
    pub fn is_holiday(&self, date: NaiveDate) -> SeatbookResult<bool> {
        if self.storage.holidays.get(&date)?.is_some() {
            return Ok(true);
        }
        Ok(self
            .default_config()?
            .is_some_and(|config| config.covers(date)))
    }

    /// Mark a date as a holiday. Returns false if it was already marked.
    pub fn mark_holiday(&self, date: NaiveDate) -> SeatbookResult<bool> {
        let row = HolidayOverride::new(date);
        let inserted = self
            .storage
            .write_locked(|| match self.storage.holidays.insert_new(row) {
                Ok(()) => Ok(true),
                Err(SeatbookError::Conflict { .. }) => Ok(false),
                Err(e) => Err(e),
            })?;
        if !inserted {
            return Ok(false);
        }

        self.storage
            .log_create(EntityType::HolidayOverride, date.to_string(), &row);

        info!(%date, "holiday marked");
        Ok(true)
    }

    /// Replace the default holiday weekdays (0 = Monday ... 6 = Sunday)
    pub fn set_default_weekdays(&self, weekdays: &[i64]) -> SeatbookResult<DefaultHolidayConfig> {
        let mut set = BTreeSet::new();
        for &day in weekdays {
            let day = u8::try_from(day)
                .ok()
                .filter(|d| *d <= MAX_WEEKDAY)
                .ok_or_else(|| {
                    SeatbookError::InvalidInput(format!(
                        "Weekday must be between 0 (Monday) and 6 (Sunday), got {}",
                        day
                    ))
                })?;
            set.insert(day);
        }

        let row = DefaultHolidayConfig::new(set);
        let previous = self
            .storage
            .write_locked(|| self.storage.default_holiday.put(row.clone()))?;
        match previous {
            Some(before) => self.storage.log_update(
                EntityType::DefaultHoliday,
                DEFAULT_KEY,
                &before,
                &row,
                Some(format!("weekdays: {:?} -> {:?}", before.weekdays, row.weekdays)),
            ),
            None => self
                .storage
                .log_create(EntityType::DefaultHoliday, DEFAULT_KEY, &row),
        }

        info!(weekdays = ?row.weekdays, "default holiday weekdays set");
        Ok(row)
    }

    /// The default holiday weekdays (empty if never set)
    pub fn default_weekdays(&self) -> SeatbookResult<BTreeSet<u8>> {
        Ok(self
            .default_config()?
            .map(|config| config.weekdays)
            .unwrap_or_default())
    }

    /// Every holiday in a month, ascending, without duplicates
    pub fn month_holidays(&self, month: YearMonth) -> SeatbookResult<Vec<NaiveDate>> {
        let marked: BTreeSet<NaiveDate> = self
            .storage
            .holidays
            .scan(|row| month.contains(row.date))?
            .into_iter()
            .map(|row| row.date)
            .collect();
        let default = self.default_config()?;

        Ok(month
            .days()
            .filter(|date| {
                marked.contains(date) || default.as_ref().is_some_and(|c| c.covers(*date))
            })
            .collect())
    }

    fn default_config(&self) -> SeatbookResult<Option<DefaultHolidayConfig>> {
        self.storage.default_holiday.get(&DEFAULT_KEY.to_string())
    }
}
