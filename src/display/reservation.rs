//! Reservation display formatting

use crate::models::Reservation;

/// Format a list of reservations as a table
pub fn format_reservation_list(reservations: &[Reservation], date_format: &str) -> String {
    if reservations.is_empty() {
        return "No reservations found.".to_string();
    }

    let name_width = reservations
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let email_width = reservations
        .iter()
        .map(|r| r.email.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let dates: Vec<String> = reservations
        .iter()
        .map(|r| r.date.format(date_format).to_string())
        .collect();
    let date_width = dates.iter().map(|d| d.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<date_width$}  {:>5}  {:<name_width$}  {:<email_width$}  {}\n",
        "Date",
        "Seats",
        "Name",
        "Email",
        "ID",
    ));
    output.push_str(&format!(
        "{:-<date_width$}  {:->5}  {:-<name_width$}  {:-<email_width$}  {:-<36}\n",
        "", "", "", "", "",
    ));

    for (reservation, date) in reservations.iter().zip(&dates) {
        output.push_str(&format!(
            "{:<date_width$}  {:>5}  {:<name_width$}  {:<email_width$}  {}\n",
            date,
            reservation.seats,
            reservation.name,
            reservation.email,
            reservation.id,
        ));
    }

    let total: u64 = reservations.iter().map(|r| u64::from(r.seats)).sum();
    output.push_str(&format!(
        "\n{} reservation(s), {} seat(s)\n",
        reservations.len(),
        total
    ));

    output
}

/// Format a single reservation's details
pub fn format_reservation_details(reservation: &Reservation, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Reservation: {}\n", reservation.id));
    output.push_str(&format!("  Name:     {}\n", reservation.name));
    output.push_str(&format!("  Email:    {}\n", reservation.email));
    output.push_str(&format!("  Date:     {}\n", reservation.date.format(date_format)));
    output.push_str(&format!("  Seats:    {}\n", reservation.seats));
    output.push_str(&format!(
        "  Created:  {}\n",
        reservation.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
