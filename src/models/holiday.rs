//! Holiday records
//!
//! A date is a holiday if it has an override row, or if its weekday is in the
//! default weekday set. Overrides only ever add holidays.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::weekday_index;
use super::seat::DEFAULT_KEY;

/// Highest valid weekday index (Sunday)
pub const MAX_WEEKDAY: u8 = 6;

/// Marks one specific date as a holiday; presence is the whole payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayOverride {
    pub date: NaiveDate,
}

impl HolidayOverride {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

/// Weekdays (0 = Monday ... 6 = Sunday) that are holidays by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultHolidayConfig {
    /// Always [`DEFAULT_KEY`]
    pub id: String,
    pub weekdays: BTreeSet<u8>,
}

impl DefaultHolidayConfig {
    pub fn new(weekdays: impl IntoIterator<Item = u8>) -> Self {
        Self {
            id: DEFAULT_KEY.to_string(),
            weekdays: weekdays.into_iter().collect(),
        }
    }

    /// Whether the date's weekday is in the default set
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&weekday_index(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekdays_deduplicate() {
        let config = DefaultHolidayConfig::new([6, 0, 6]);
        assert_eq!(config.weekdays.iter().copied().collect::<Vec<_>>(), vec![0, 6]);
    }

    #[test]
    fn test_covers() {
        let config = DefaultHolidayConfig::new([0, 6]);
        let monday = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 7, 16).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 7, 21).unwrap();

        assert!(config.covers(monday));
        assert!(!config.covers(tuesday));
        assert!(config.covers(sunday));
    }

    #[test]
    fn test_serialized_as_list() {
        let json = serde_json::to_string(&DefaultHolidayConfig::new([6, 0])).unwrap();
        assert_eq!(json, r#"{"id":"default","weekdays":[0,6]}"#);
    }
}
