//! Month listings: capacities, holidays and availability

use chrono::NaiveDate;

use crate::models::{DayAvailability, DayCapacity, YearMonth};

/// Format the capacity of every day in a month
pub fn format_month_capacities(month: YearMonth, days: &[DayCapacity], date_format: &str) -> String {
    let mut output = format!("Seats for {}\n", month);
    for day in days {
        output.push_str(&format!(
            "  {:<16} {:>5}\n",
            day.date.format(date_format).to_string(),
            day.seats
        ));
    }
    output
}

/// Format the holidays of a month
pub fn format_month_holidays(month: YearMonth, dates: &[NaiveDate], date_format: &str) -> String {
    if dates.is_empty() {
        return format!("No holidays in {}.", month);
    }

    let mut output = format!("Holidays in {}\n", month);
    for date in dates {
        output.push_str(&format!("  {}\n", date.format(date_format)));
    }
    output
}

/// Format capacity, bookings and remaining seats per day
pub fn format_availability(month: YearMonth, days: &[DayAvailability], date_format: &str) -> String {
    let mut output = format!("Availability for {}\n", month);
    output.push_str(&format!(
        "  {:<16} {:>8} {:>8} {:>9}\n",
        "Date", "Capacity", "Booked", "Remaining"
    ));

    for day in days {
        let marker = if day.holiday { "  holiday" } else { "" };
        output.push_str(&format!(
            "  {:<16} {:>8} {:>8} {:>9}{}\n",
            day.date.format(date_format).to_string(),
            day.capacity,
            day.booked,
            day.remaining,
            marker
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_holidays() {
        let month = YearMonth::new(2024, 7).unwrap();
        assert_eq!(format_month_holidays(month, &[], "%Y-%m-%d"), "No holidays in 2024/07.");
    }

    #[test]
    fn test_availability_marks_holidays() {
        let month = YearMonth::new(2024, 7).unwrap();
        let day = DayAvailability {
            date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            capacity: 5,
            booked: 2,
            remaining: 3,
            holiday: true,
        };

        let output = format_availability(month, &[day], "%Y-%m-%d");
        assert!(output.contains("2024-07-15"));
        assert!(output.contains("holiday"));
    }
}
