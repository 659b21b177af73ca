//! Seat capacity CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_month_capacities;
use crate::error::SeatbookResult;
use crate::services::{parse_date, parse_month, CapacityResolver};
use crate::storage::Storage;

/// Seat subcommands
#[derive(Subcommand)]
pub enum SeatCommands {
    /// Show the capacity of every day in a month
    Month {
        /// Month (YYYY/MM)
        month: String,
    },
    /// Show the effective capacity of one date
    Show {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Set the capacity of one date
    Set {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Number of seats
        #[arg(allow_negative_numbers = true)]
        seats: i64,
    },
    /// Set the capacity used for dates without an override
    Default {
        /// Number of seats
        #[arg(allow_negative_numbers = true)]
        seats: i64,
    },
}

/// Handle a seat command
pub fn handle_seat_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SeatCommands,
) -> SeatbookResult<()> {
    let resolver = CapacityResolver::new(storage);

    match cmd {
        SeatCommands::Month { month } => {
            let month = parse_month(&month)?;
            let days = resolver.month_capacities(month)?;
            print!("{}", format_month_capacities(month, &days, &settings.date_format));
        }

        SeatCommands::Show { date } => {
            let date = parse_date(&date)?;
            let seats = resolver.effective_capacity(date)?;
            let source = if resolver.get_override(date)?.is_some() {
                "override"
            } else if resolver.default_seats()?.is_some() {
                "default"
            } else {
                "not configured"
            };
            println!("{}: {} seat(s) ({})", date, seats, source);
        }

        SeatCommands::Set { date, seats } => {
            let date = parse_date(&date)?;
            let row = resolver.set_override(date, seats)?;
            println!("Set capacity for {} to {} seat(s)", row.date, row.seats);
        }

        SeatCommands::Default { seats } => {
            let row = resolver.set_default(seats)?;
            println!("Set default capacity to {} seat(s)", row.seats);
        }
    }

    Ok(())
}
