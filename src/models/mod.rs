//! Core data models for Seatbook
//!
//! This module contains the data structures of the reservation domain:
//! reservations, seat capacity records and holiday records.

pub mod calendar;
pub mod holiday;
pub mod ids;
pub mod reservation;
pub mod seat;

pub use calendar::{parse_iso_date, weekday_index, DateParseError, MonthParseError, YearMonth};
pub use holiday::{DefaultHolidayConfig, HolidayOverride, MAX_WEEKDAY};
pub use ids::ReservationId;
pub use reservation::{NewReservation, Reservation, ReservationValidationError};
pub use seat::{DayAvailability, DayCapacity, DefaultSeatConfig, SeatOverride, DEFAULT_KEY};
