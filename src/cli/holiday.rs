//! Holiday CLI commands

use std::collections::BTreeSet;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_month_holidays;
use crate::error::SeatbookResult;
use crate::services::{parse_date, parse_month, HolidayResolver};
use crate::storage::Storage;

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Holiday subcommands
#[derive(Subcommand)]
pub enum HolidayCommands {
    /// List the holidays in a month
    Month {
        /// Month (YYYY/MM)
        month: String,
    },
    /// Check whether a date is a holiday
    Check {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Mark a date as a holiday
    Mark {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Replace the weekdays that are holidays by default
    Default {
        /// Weekday indices, 0 = Monday ... 6 = Sunday (none clears the set)
        #[arg(num_args = 0.., allow_negative_numbers = true)]
        weekdays: Vec<i64>,
    },
}

/// Handle a holiday command
pub fn handle_holiday_command(
    storage: &Storage,
    settings: &Settings,
    cmd: HolidayCommands,
) -> SeatbookResult<()> {
    let resolver = HolidayResolver::new(storage);

    match cmd {
        HolidayCommands::Month { month } => {
            let month = parse_month(&month)?;
            let dates = resolver.month_holidays(month)?;
            println!("{}", format_month_holidays(month, &dates, &settings.date_format).trim_end());
            let defaults = resolver.default_weekdays()?;
            if !defaults.is_empty() {
                println!("Default weekdays: {}", weekday_names(&defaults));
            }
        }

        HolidayCommands::Check { date } => {
            let date = parse_date(&date)?;
            if resolver.is_holiday(date)? {
                println!("{} is a holiday", date);
            } else {
                println!("{} is not a holiday", date);
            }
        }

        HolidayCommands::Mark { date } => {
            let date = parse_date(&date)?;
            if resolver.mark_holiday(date)? {
                println!("Marked {} as a holiday", date);
            } else {
                println!("{} is already marked as a holiday", date);
            }
        }

        HolidayCommands::Default { weekdays } => {
            let config = resolver.set_default_weekdays(&weekdays)?;
            if config.weekdays.is_empty() {
                println!("Cleared default holiday weekdays");
            } else {
                println!("Default holiday weekdays: {}", weekday_names(&config.weekdays));
            }
        }
    }

    Ok(())
}

fn weekday_names(weekdays: &BTreeSet<u8>) -> String {
    weekdays
        .iter()
        .filter_map(|d| WEEKDAY_NAMES.get(usize::from(*d)).copied())
        .collect::<Vec<_>>()
        .join(", ")
}
