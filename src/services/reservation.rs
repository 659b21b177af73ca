//! Reservation service
//!
//! Admission of new reservations against the effective capacity of a date,
//! plus cancellation and listing.
//!
//! Admission reads the capacity and the seats already booked, then inserts.
//! Those steps run under the per-date lock of [`AdmissionGate`] and then the
//! data directory lock of [`Storage::write_locked`], so concurrent requests
//! for the same date are admitted one at a time whether they come from
//! threads or from separate processes. Lowering a capacity below what is
//! already booked never touches existing reservations.
//!
//! [`AdmissionGate`]: crate::storage::AdmissionGate

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{DayAvailability, NewReservation, Reservation, ReservationId, YearMonth};
use crate::storage::Storage;

use super::{parse_date, CapacityResolver, HolidayResolver};

/// Service for reservation admission and lookup
pub struct ReservationService<'a> {
    storage: &'a Storage,
}

impl<'a> ReservationService<'a> {
    /// Create a new reservation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a reservation if it fits in the date's remaining capacity
    pub fn create(&self, request: &NewReservation) -> SeatbookResult<Reservation> {
        let seats = u32::try_from(request.seats)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                SeatbookError::InvalidInput(format!(
                    "Seats must be a positive integer, got {}",
                    request.seats
                ))
            })?;
        let date = parse_date(&request.date)?;

        let reservation = Reservation::new(
            request.name.trim(),
            request.email.trim(),
            date,
            seats,
        );
        reservation
            .validate()
            .map_err(|e| SeatbookError::InvalidInput(e.to_string()))?;

        self.storage.admission.with_date(date, || {
            self.storage.write_locked(|| self.admit(&reservation))
        })?;

        self.storage.log_create(
            EntityType::Reservation,
            reservation.id.as_str(),
            &reservation,
        );
        info!(id = %reservation.id, %date, seats, "reservation created");

        Ok(reservation)
    }

    /// Check capacity on the freshly loaded tables and insert
    fn admit(&self, reservation: &Reservation) -> SeatbookResult<()> {
        let (date, seats) = (reservation.date, reservation.seats);
        let capacity = CapacityResolver::new(self.storage).effective_capacity(date)?;
        let booked = self.storage.reservations.sum_seats_for_date(date)?;
        debug!(%date, capacity, booked, requested = seats, "admission check");

        if booked + u64::from(seats) > u64::from(capacity) {
            let remaining = remaining(capacity, booked);
            warn!(%date, requested = seats, remaining, "capacity exceeded");
            return Err(SeatbookError::CapacityExceeded {
                date,
                requested: seats,
                remaining,
            });
        }

        self.storage.reservations.insert(reservation.clone())
    }

    /// Get a reservation by id
    pub fn get(&self, id: &ReservationId) -> SeatbookResult<Reservation> {
        self.storage.reservations.get_by_id(id)
    }

    /// Cancel a reservation, freeing its seats
    pub fn cancel(&self, id: &ReservationId) -> SeatbookResult<Reservation> {
        let removed = self
            .storage
            .write_locked(|| self.storage.reservations.delete(id))?;

        self.storage.record(&[
            AuditEntry::delete(EntityType::Reservation, id.as_str(), &removed).with_summary(
                format!("freed {} seat(s) on {}", removed.seats, removed.date),
            ),
        ]);
        info!(%id, date = %removed.date, seats = removed.seats, "reservation cancelled");

        Ok(removed)
    }

    /// Reservations held by an email, newest date first
    pub fn list_for_user(&self, email: &str) -> SeatbookResult<Vec<Reservation>> {
        self.storage.reservations.list_by_email(email.trim())
    }

    /// Reservations in a month, oldest date first
    pub fn list_for_month(&self, month: YearMonth) -> SeatbookResult<Vec<Reservation>> {
        self.storage.reservations.list_by_month(month)
    }

    /// Seats still available on a date (0 if already over capacity)
    pub fn remaining_seats(&self, date: NaiveDate) -> SeatbookResult<u32> {
        let capacity = CapacityResolver::new(self.storage).effective_capacity(date)?;
        let booked = self.storage.reservations.sum_seats_for_date(date)?;
        Ok(remaining(capacity, booked))
    }

    /// Capacity, bookings and holiday status for every day of a month
    pub fn month_availability(&self, month: YearMonth) -> SeatbookResult<Vec<DayAvailability>> {
        let capacities = CapacityResolver::new(self.storage).month_capacities(month)?;
        let holidays = HolidayResolver::new(self.storage).month_holidays(month)?;
        let reservations = self.list_for_month(month)?;

        Ok(capacities
            .into_iter()
            .map(|day| {
                let booked: u64 = reservations
                    .iter()
                    .filter(|r| r.date == day.date)
                    .map(|r| u64::from(r.seats))
                    .sum();
                DayAvailability {
                    date: day.date,
                    capacity: day.seats,
                    booked,
                    remaining: remaining(day.seats, booked),
                    holiday: holidays.contains(&day.date),
                }
            })
            .collect())
    }
}

fn remaining(capacity: u32, booked: u64) -> u32 {
    u64::from(capacity)
        .saturating_sub(booked)
        .try_into()
        .unwrap_or(u32::MAX)
}
