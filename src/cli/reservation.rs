//! Reservation CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_reservation_details, format_reservation_list};
use crate::error::{SeatbookError, SeatbookResult};
use crate::models::{NewReservation, ReservationId};
use crate::services::ReservationService;
use crate::storage::Storage;

/// Reservation subcommands
#[derive(Subcommand)]
pub enum ReservationCommands {
    /// Book seats on a date
    Create {
        /// Guest name
        #[arg(short, long)]
        name: String,
        /// Contact email
        #[arg(short, long)]
        email: String,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Number of seats
        #[arg(short, long, allow_negative_numbers = true)]
        seats: i64,
    },
    /// List reservations for an email, newest first
    List {
        /// Contact email
        #[arg(short, long)]
        email: String,
    },
    /// Show a reservation
    Show {
        /// Reservation ID
        id: String,
    },
    /// Cancel a reservation
    Cancel {
        /// Reservation ID
        id: String,
    },
}

/// Handle a reservation command
pub fn handle_reservation_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReservationCommands,
) -> SeatbookResult<()> {
    let service = ReservationService::new(storage);

    match cmd {
        ReservationCommands::Create {
            name,
            email,
            date,
            seats,
        } => {
            let reservation = service.create(&NewReservation::new(name, email, date, seats))?;
            println!("Reserved {} seat(s) on {}", reservation.seats, reservation.date);
            println!("ID: {}", reservation.id);
        }

        ReservationCommands::List { email } => {
            let reservations = service.list_for_user(&email)?;
            print!("{}", format_reservation_list(&reservations, &settings.date_format));
            if reservations.is_empty() {
                println!();
            }
        }

        ReservationCommands::Show { id } => {
            let reservation = service.get(&parse_id(&id)?)?;
            print!("{}", format_reservation_details(&reservation, &settings.date_format));
        }

        ReservationCommands::Cancel { id } => {
            let cancelled = service.cancel(&parse_id(&id)?)?;
            println!(
                "Cancelled reservation {} ({} seat(s) on {})",
                cancelled.id, cancelled.seats, cancelled.date
            );
        }
    }

    Ok(())
}

fn parse_id(id: &str) -> SeatbookResult<ReservationId> {
    id.parse()
        .map_err(|e: crate::models::ids::EmptyIdError| SeatbookError::InvalidInput(e.to_string()))
}
