// src/main.rs

use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use log::{error, info, warn};
use std::env;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

// Module declarations
mod cli;
mod config;
mod error;
mod file_utils;
mod history_manager;
mod launcher;
mod logging;
mod picker;
mod ui;

// Crate imports for convenience
use crate::cli::{Cli, Command};
use crate::config::{expand_path, load_config, resolve_config_path, AppConfig, CONFIG_ENV_VAR};
use crate::error::PickerError;
use crate::file_utils::{get_config_path, get_history_db_path, get_log_dir, scan_directories};
use crate::history_manager::HistoryStore;
use crate::launcher::{DryRunOpener, Opener, SystemOpener};
use crate::picker::{pick_next, remaining};

fn main() {
    dotenvy::dotenv().ok();
    let cli_args = Cli::parse();

    let log_dir = if cli_args.no_log_file {
        None
    } else {
        Some(get_log_dir())
    };
    logging::init_logger(log_dir);

    let linger = cli_args.linger;
    let code = match run_app(cli_args) {
        Ok(()) => 0,
        Err(err) => {
            error!("{}", err);
            eprintln!("\nApplication Error: {}", err);
            err.exit_code()
        }
    };

    countdown(linger);
    process::exit(code);
}

fn run_app(cli_args: Cli) -> Result<(), PickerError> {
    let env_config = env::var(CONFIG_ENV_VAR).ok();
    let config_path = resolve_config_path(
        cli_args.config.as_deref(),
        env_config.as_deref(),
        get_config_path,
    )?;
    info!("Loading configuration from '{}'.", config_path.display());
    let config = load_config(&config_path)?;

    let db_path = history_db_path(cli_args.database.as_deref(), &config)?;
    let mut store = HistoryStore::open(&db_path)?;

    match cli_args.command.unwrap_or(Command::Pick) {
        Command::Pick => {
            let opener: Box<dyn Opener> = if cli_args.no_open {
                Box::new(DryRunOpener)
            } else {
                Box::new(SystemOpener)
            };
            run_pick(&config, &mut store, opener.as_ref())
        }
        Command::History { limit } => {
            ui::print_history(&store.entries(limit)?);
            Ok(())
        }
        Command::Status => {
            let candidates = scan_directories(&config.scan_paths, config.recursive);
            let picked = store.all()?;
            let left = remaining(&candidates, &picked);
            ui::print_status(candidates.len(), picked.len(), left.len());
            Ok(())
        }
        Command::Reset { yes } => {
            let picked = store.count()?;
            if picked == 0 {
                println!("History is already empty.");
                return Ok(());
            }
            if !yes && !ui::confirm_reset(&ColorfulTheme::default(), picked)? {
                println!("History left untouched.");
                return Ok(());
            }
            let cleared = store.clear()?;
            info!("History reset on request ({} entries removed).", cleared);
            println!("Forgot {} picked videos.", cleared);
            Ok(())
        }
    }
}

/// Scan, then hand the candidates to the picker. An empty scan counts as an
/// exhausted cycle and resets the history.
fn run_pick(
    config: &AppConfig,
    store: &mut HistoryStore,
    opener: &dyn Opener,
) -> Result<(), PickerError> {
    let candidates = scan_directories(&config.scan_paths, config.recursive);
    if candidates.is_empty() {
        warn!("No candidate videos found in any configured directory.");
        println!("No videos found in the configured folders.");
    }

    let outcome = pick_next(&candidates, store, opener)?;
    println!("{}", ui::describe_outcome(&outcome));
    Ok(())
}

/// CLI flag, then config document, then the app data directory.
fn history_db_path(cli_value: Option<&str>, config: &AppConfig) -> Result<PathBuf, PickerError> {
    match cli_value.filter(|v| !v.trim().is_empty()) {
        Some(raw) => expand_path(raw.trim()).map_err(PickerError::InvalidArgument),
        None => match &config.history_db {
            Some(path) => Ok(path.clone()),
            None => get_history_db_path(),
        },
    }
}

fn countdown(seconds: u64) {
    for secs_left in (1..=seconds).rev() {
        println!("Closing in {}...", secs_left);
        thread::sleep(Duration::from_secs(1));
    }
}
