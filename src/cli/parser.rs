use crate::export::ExportFormat;
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for goltime
#[derive(Parser)]
#[command(
    name = "goltime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track time per task: start/stop sessions with an optional countdown, logged to a daily file",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (default: ~/.goltime.yml)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Milliseconds per countdown minute (useful for tests)
    #[arg(global = true, long = "minute-ms", hide = true)]
    pub minute_ms: Option<u64>,

    /// Notification ceiling in milliseconds (useful for tests)
    #[arg(global = true, long = "notify-ms", hide = true)]
    pub notify_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file and create the tracking directory
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for inconsistencies")]
        check: bool,

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

    /// Start the interactive task board
    Run {
        /// Initial countdown in minutes (0 => no countdown)
        #[arg(long, short = 'c')]
        countdown: Option<u32>,
    },

    /// List the records and sessions of a day
    List {
        #[arg(long, short, help = "Day to show (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "records", help = "Show raw BEGIN/END records")]
        records: bool,
    },

    /// Export the sessions of a day
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Day to export (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
