//! Admin CLI commands: month-wide views and exports

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_availability, format_reservation_list};
use crate::error::{SeatbookError, SeatbookResult};
use crate::export::{export_full_json, export_month_csv};
use crate::services::{parse_month, ReservationService};
use crate::storage::Storage;

/// Export formats
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    /// One month of reservations as CSV
    Csv,
    /// Every table as JSON
    Json,
}

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// List every reservation in a month, oldest first
    Reservations {
        /// Month (YYYY/MM)
        month: String,
    },
    /// Show capacity, bookings and remaining seats per day
    Availability {
        /// Month (YYYY/MM)
        month: String,
    },
    /// Export data
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Month to export (required for CSV)
        #[arg(short, long)]
        month: Option<String>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an admin command
pub fn handle_admin_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AdminCommands,
) -> SeatbookResult<()> {
    let service = ReservationService::new(storage);

    match cmd {
        AdminCommands::Reservations { month } => {
            let month = parse_month(&month)?;
            let reservations = service.list_for_month(month)?;
            println!("Reservations for {}", month);
            print!("{}", format_reservation_list(&reservations, &settings.date_format));
            if reservations.is_empty() {
                println!();
            }
        }

        AdminCommands::Availability { month } => {
            let month = parse_month(&month)?;
            let days = service.month_availability(month)?;
            print!("{}", format_availability(month, &days, &settings.date_format));
        }

        AdminCommands::Export {
            format,
            month,
            output,
        } => {
            // Validate before the output file is created
            let csv_month = match format {
                ExportFormat::Csv => {
                    let month = month.ok_or_else(|| {
                        SeatbookError::InvalidInput("CSV export requires --month".into())
                    })?;
                    Some(parse_month(&month)?)
                }
                ExportFormat::Json => None,
            };

            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
                    SeatbookError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?)),
                None => Box::new(io::stdout().lock()),
            };

            match csv_month {
                Some(month) => {
                    let count = export_month_csv(storage, month, &mut writer)?;
                    if let Some(path) = &output {
                        eprintln!("Exported {} reservation(s) to {}", count, path.display());
                    }
                }
                None => {
                    export_full_json(storage, &mut writer, true)?;
                    writeln!(writer).map_err(|e| SeatbookError::Export(e.to_string()))?;
                    if let Some(path) = &output {
                        eprintln!("Exported all tables to {}", path.display());
                    }
                }
            }

            writer
                .flush()
                .map_err(|e| SeatbookError::Export(e.to_string()))?;
        }
    }

    Ok(())
}
