//! JSON export of every table

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{DefaultHolidayConfig, DefaultSeatConfig, HolidayOverride, Reservation, SeatOverride};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub reservations: Vec<Reservation>,
    pub seats: Vec<SeatOverride>,
    pub holidays: Vec<HolidayOverride>,
    pub default_seat: Option<DefaultSeatConfig>,
    pub default_holiday: Option<DefaultHolidayConfig>,
}

impl FullExport {
    /// Snapshot every table
    pub fn from_storage(storage: &Storage) -> SeatbookResult<Self> {
        let mut reservations = storage.reservations.table().all()?;
        reservations.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            reservations,
            seats: storage.seats.all()?,
            holidays: storage.holidays.all()?,
            default_seat: storage.default_seat.all()?.into_iter().next(),
            default_holiday: storage.default_holiday.all()?.into_iter().next(),
        })
    }
}

/// Export every table to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> SeatbookResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SeatbookError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SeatbookPaths;
    use crate::storage::seed_sample_data;
    use tempfile::TempDir;

    #[test]
    fn test_export_full_json() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(SeatbookPaths::with_base_dir(temp_dir.path().to_path_buf()))
            .unwrap();
        seed_sample_data(&storage).unwrap();

        let mut buf = Vec::new();
        export_full_json(&storage, &mut buf, false).unwrap();
        let export: FullExport = serde_json::from_slice(&buf).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.reservations.len(), 1);
        assert_eq!(export.seats.len(), 1);
        assert_eq!(export.holidays.len(), 1);
        assert_eq!(export.default_seat.map(|d| d.seats), Some(10));
        assert_eq!(
            export.default_holiday.map(|d| d.weekdays.into_iter().collect::<Vec<_>>()),
            Some(vec![0, 6])
        );
    }
}
