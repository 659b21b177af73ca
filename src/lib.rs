//! Seatbook - per-day seat reservations
//!
//! Books seats against a per-date capacity. A date's capacity is its seat
//! override if one exists, else the default seat count, else zero. Holidays
//! are informational and come from marked dates plus a set of default
//! weekdays.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the crate error type
//! - `models`: reservations, capacity and holiday records, calendar helpers
//! - `storage`: JSON table files and the per-date admission gate
//! - `services`: capacity and holiday resolution, reservation admission
//! - `audit`: append-only log of every mutation
//! - `display`, `export`, `cli`: terminal output and the command-line surface
//!
//! # Example
//!
//! ```rust,ignore
//! use seatbook::config::paths::SeatbookPaths;
//! use seatbook::models::NewReservation;
//! use seatbook::services::ReservationService;
//! use seatbook::storage::Storage;
//!
//! let storage = Storage::open(SeatbookPaths::new()?)?;
//! let service = ReservationService::new(&storage);
//! service.create(&NewReservation::new("Ann", "ann@example.com", "2024-07-16", 2))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SeatbookError, SeatbookResult};
