// src/cli.rs

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Picks a video nobody has picked yet from the configured folders and opens it.",
    long_about = None
)]
pub struct Cli {
    /// Path to the JSON scan configuration. Overrides PICK_AN_IDEA_CONFIG.
    #[clap(short, long)]
    pub config: Option<String>,

    /// Path to the history database. Overrides `history_db` from the configuration.
    #[clap(long)]
    pub database: Option<String>,

    /// Record the pick but do not open the file.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub no_open: bool,

    /// Only log to the console.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub no_log_file: bool,

    /// Seconds to count down before exiting.
    #[clap(long, default_value_t = 0)]
    pub linger: u64,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Pick, record and open an unpicked video (default).
    Pick,
    /// List recently picked videos.
    History {
        #[clap(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show how many videos are left in the current cycle.
    Status,
    /// Forget every picked video.
    Reset {
        /// Skip the confirmation prompt.
        #[clap(short, long, action = clap::ArgAction::SetTrue)]
        yes: bool,
    },
}
