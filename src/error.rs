// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Unrecoverable failures of a run. Anything not listed here (missing scan
/// directories, duplicate history rows, launch failures) is logged and the
/// run carries on.
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Could not read configuration file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in '{}': {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to determine the system's data directory")]
    DataDir,

    #[error("Could not prepare history database location '{}': {source}", path.display())]
    StorageInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl PickerError {
    /// Process exit code for this failure. Successful runs exit with 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            PickerError::ConfigMissing(_)
            | PickerError::ConfigRead { .. }
            | PickerError::ConfigInvalid { .. }
            | PickerError::InvalidArgument(_) => 2,
            PickerError::DataDir | PickerError::StorageInit { .. } | PickerError::Storage(_) => 3,
            PickerError::Prompt(_) => 1,
        }
    }
}
