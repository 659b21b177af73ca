//! Display formatting for terminal output
//!
//! Formats reservations and calendar listings as plain-text tables.

pub mod calendar;
pub mod reservation;

pub use calendar::{format_availability, format_month_capacities, format_month_holidays};
pub use reservation::{format_reservation_details, format_reservation_list};
