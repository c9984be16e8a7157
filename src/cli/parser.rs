use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rLounge
/// CLI application to track who sits at which lounge station
#[derive(Parser)]
#[command(
    name = "rlounge",
    version = env!("CARGO_PKG_VERSION"),
    about = "A lounge occupancy tracker: check users in and out of stations and keep a daily log",
    long_about = None
)]
pub struct Cli {
    /// Override data directory (useful for tests or a shared folder)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and data folders
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Check a user in, on a station or into the queue
    Checkin {
        #[arg(long, help = "User name")]
        name: String,

        #[arg(
            long,
            required_unless_present = "auto_id",
            conflicts_with = "auto_id",
            help = "User ID"
        )]
        id: Option<String>,

        #[arg(long = "auto-id", help = "Generate the next free LOUNGE-n member ID")]
        auto_id: bool,

        #[arg(long, help = "Station ID (omit or 0 to queue the user)")]
        station: Option<String>,
    },

    /// Check a user out and close the log entry
    Checkout {
        /// Occupant ID
        id: String,
    },

    /// Move a queued user onto a station
    Assign {
        /// Occupant ID
        id: String,
        /// Target station ID
        station: u32,
    },

    /// Remove a user from the queue
    Unqueue {
        /// Occupant ID
        id: String,
    },

    /// Show stations and active users
    Status {
        #[arg(long = "queue", help = "Show only queued users")]
        queue: bool,
    },

    /// Print a day's check-in log
    Log {
        #[arg(long, help = "Day to show (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Export log records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, conflicts_with = "range", help = "Day to export (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Export a month or a custom range (YYYY-MM, YYYY-MM-DD:YYYY-MM-DD)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show or rearrange the station slot layout
    Layout {
        #[arg(long = "print", help = "Print the station → slot mapping")]
        print: bool,

        #[arg(
            long = "swap",
            num_args = 2,
            value_names = ["STATION", "SLOT"],
            help = "Move a station to a slot, swapping with its current holder"
        )]
        swap: Option<Vec<String>>,

        #[arg(
            long = "drop",
            num_args = 3,
            value_names = ["STATION", "X", "Y"],
            allow_negative_numbers = true,
            help = "Drop a station at canvas coordinates (snaps to the nearest slot)"
        )]
        drop_at: Option<Vec<String>>,
    },

    /// Print the radial placement of active users
    Place {
        #[arg(long, requires = "height")]
        width: Option<f32>,

        #[arg(long, requires = "width")]
        height: Option<f32>,

        #[arg(long, help = "Seed for a reproducible layout")]
        seed: Option<u64>,
    },

    /// Search the membership roster
    Members {
        #[arg(long, help = "Case-insensitive match on name or ID")]
        search: Option<String>,
    },
}
