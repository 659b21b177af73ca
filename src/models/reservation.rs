//! Reservation model
//!
//! A reservation holds a number of seats on one calendar day for one contact.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ReservationId;

/// Maximum length of a reservation name
pub const MAX_NAME_LEN: usize = 100;

/// A persisted seat reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier, assigned at creation
    pub id: ReservationId,

    /// Display name of the guest
    pub name: String,

    /// Contact email (not unique; one person may hold many reservations)
    pub email: String,

    /// The reserved day
    pub date: NaiveDate,

    /// Number of seats consumed (always positive)
    pub seats: u32,

    /// When the reservation was created
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a new reservation with a fresh id and creation timestamp
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: NaiveDate, seats: u32) -> Self {
        Self {
            id: ReservationId::generate(),
            name: name.into(),
            email: email.into(),
            date,
            seats,
            created_at: Utc::now(),
        }
    }

    /// Validate the reservation
    pub fn validate(&self) -> Result<(), ReservationValidationError> {
        if self.name.trim().is_empty() {
            return Err(ReservationValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ReservationValidationError::NameTooLong(self.name.chars().count()));
        }

        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ReservationValidationError::InvalidEmail(self.email.clone()));
        }

        if self.seats == 0 {
            return Err(ReservationValidationError::NoSeats);
        }

        Ok(())
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} seats on {})", self.name, self.seats, self.date)
    }
}

/// A reservation request as received from a caller, before validation.
///
/// Fields are kept loose (string date, signed seat count) so that malformed
/// input is rejected by the service with `InvalidInput` rather than by the
/// caller's parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub name: String,
    pub email: String,
    pub date: String,
    pub seats: i64,
}

impl NewReservation {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        date: impl Into<String>,
        seats: i64,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date: date.into(),
            seats,
        }
    }
}

/// Validation errors for reservations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
    NoSeats,
}

impl fmt::Display for ReservationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Reservation name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Reservation name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{}'", email),
            Self::NoSeats => write!(f, "A reservation must hold at least one seat"),
        }
    }
}

impl std::error::Error for ReservationValidationError {}
