use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seatbook::cli::{
    handle_admin_command, handle_holiday_command, handle_reservation_command, handle_seat_command,
};
use seatbook::config::{paths::SeatbookPaths, settings::Settings};
use seatbook::audit::AuditLogger;
use seatbook::storage::{init, table_file_state, Storage};

#[derive(Parser)]
#[command(
    name = "seatbook",
    version,
    about = "Per-day seat reservations",
    long_about = "Seatbook books seats against a per-day capacity. Capacity comes from \
                  a per-date override or a default seat count, and holidays come from \
                  marked dates or default weekdays."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Load the sample data set
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Reservation commands
    #[command(subcommand, alias = "res")]
    Reserve(seatbook::cli::ReservationCommands),

    /// Seat capacity commands
    #[command(subcommand)]
    Seat(seatbook::cli::SeatCommands),

    /// Holiday commands
    #[command(subcommand)]
    Holiday(seatbook::cli::HolidayCommands),

    /// Month-wide views and exports
    #[command(subcommand)]
    Admin(seatbook::cli::AdminCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let paths = SeatbookPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Tables are opened per command so `config` still works when one is corrupt
    let open_storage = || Storage::open(paths.clone());

    match cli.command {
        Some(Commands::Init { sample }) => {
            println!("Initializing Seatbook at: {}", paths.data_dir().display());
            init::initialize_storage(&paths)?;
            settings.setup_completed = true;
            settings.save(&paths)?;
            if sample {
                let rows = init::seed_sample_data(&open_storage()?)?;
                println!("Loaded {} sample row(s)", rows);
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'seatbook seat default <SEATS>' to set the default capacity.");
        }
        Some(Commands::Config) => {
            println!("Seatbook Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Tables:");
            for file in paths.table_files() {
                println!("  {:<28} {}", file.display().to_string(), table_file_state(&file));
            }
            println!();
            println!("Settings:");
            println!("  Log filter:  {}", settings.log_filter);
            println!("  Date format: {}", settings.date_format);
            println!("  Initialized: {}", settings.setup_completed);
            if init::needs_initialization(&paths) {
                println!();
                println!("Some tables are missing. Run 'seatbook init' to create them.");
            }
        }
        Some(Commands::Reserve(cmd)) => {
            handle_reservation_command(&open_storage()?, &settings, cmd)?
        }
        Some(Commands::Seat(cmd)) => handle_seat_command(&open_storage()?, &settings, cmd)?,
        Some(Commands::Holiday(cmd)) => handle_holiday_command(&open_storage()?, &settings, cmd)?,
        Some(Commands::Admin(cmd)) => handle_admin_command(&open_storage()?, &settings, cmd)?,
        Some(Commands::Audit { count }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Seatbook - per-day seat reservations");
            println!();
            println!("Run 'seatbook --help' for usage information.");
            println!("Run 'seatbook init --sample' to get started with sample data.");
        }
    }

    Ok(())
}
