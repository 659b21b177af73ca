//! Seat capacity records
//!
//! A date-specific override takes precedence over the singleton default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Key of the singleton configuration rows
pub const DEFAULT_KEY: &str = "default";

/// Capacity for one specific date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatOverride {
    pub date: NaiveDate,
    pub seats: u32,
}

impl SeatOverride {
    pub fn new(date: NaiveDate, seats: u32) -> Self {
        Self { date, seats }
    }
}

/// Capacity applied to every date without an override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSeatConfig {
    /// Always [`DEFAULT_KEY`]
    pub id: String,
    pub seats: u32,
}

impl DefaultSeatConfig {
    pub fn new(seats: u32) -> Self {
        Self {
            id: DEFAULT_KEY.to_string(),
            seats,
        }
    }
}

/// Effective capacity of one day, as listed for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCapacity {
    pub date: NaiveDate,
    pub seats: u32,
}

/// Capacity, bookings and holiday status of one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub capacity: u32,
    pub booked: u64,
    pub remaining: u32,
    pub holiday: bool,
}
