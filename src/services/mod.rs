//! Service layer for Seatbook
//!
//! The service layer provides business logic on top of the storage layer:
//! capacity and holiday resolution, and reservation admission.

pub mod capacity;
pub mod holiday;
pub mod reservation;

pub use capacity::CapacityResolver;
pub use holiday::HolidayResolver;
pub use reservation::ReservationService;

use chrono::NaiveDate;

use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{parse_iso_date, YearMonth};

/// Parse a caller-supplied `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> SeatbookResult<NaiveDate> {
    parse_iso_date(s).map_err(|e| SeatbookError::InvalidInput(e.to_string()))
}

/// Parse a caller-supplied `YYYY/MM` month
pub fn parse_month(s: &str) -> SeatbookResult<YearMonth> {
    YearMonth::parse(s).map_err(|e| SeatbookError::InvalidInput(e.to_string()))
}

/// Validate a caller-supplied capacity (zero allowed)
fn capacity_from(seats: i64) -> SeatbookResult<u32> {
    u32::try_from(seats).map_err(|_| {
        SeatbookError::InvalidInput(format!(
            "Seat capacity must be a non-negative integer, got {}",
            seats
        ))
    })
}
