//! Export module for Seatbook
//!
//! - CSV: one month of reservations (spreadsheet-compatible)
//! - JSON: every table, for backup or inspection

pub mod csv;
pub mod json;

pub use self::csv::export_month_csv;
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
