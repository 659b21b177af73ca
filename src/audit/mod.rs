//! Audit trail for Seatbook
//!
//! Every mutation of durable state (reservations, seat and holiday overrides,
//! the two defaults) is appended to a line-delimited JSON log with the
//! before/after values of the row.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to `audit.log` and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
