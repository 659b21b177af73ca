//! CSV export of a month's reservations

use std::io::Write;

use crate::error::{SeatbookError, SeatbookResult};
use crate::models::YearMonth;
use crate::services::ReservationService;
use crate::storage::Storage;

/// Write every reservation in `month`, date ascending, as CSV
pub fn export_month_csv<W: Write>(
    storage: &Storage,
    month: YearMonth,
    writer: W,
) -> SeatbookResult<usize> {
    let reservations = ReservationService::new(storage).list_for_month(month)?;

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "date", "name", "email", "seats", "created_at"])
        .map_err(|e| SeatbookError::Export(e.to_string()))?;

    for r in &reservations {
        csv_writer
            .write_record([
                r.id.to_string(),
                r.date.to_string(),
                r.name.clone(),
                r.email.clone(),
                r.seats.to_string(),
                r.created_at.to_rfc3339(),
            ])
            .map_err(|e| SeatbookError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| SeatbookError::Export(e.to_string()))?;

    Ok(reservations.len())
}
