//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Each command group
//! corresponds to one area of the reservation API.

pub mod admin;
pub mod holiday;
pub mod reservation;
pub mod seat;

pub use admin::{handle_admin_command, AdminCommands};
pub use holiday::{handle_holiday_command, HolidayCommands};
pub use reservation::{handle_reservation_command, ReservationCommands};
pub use seat::{handle_seat_command, SeatCommands};
