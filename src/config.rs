// src/config.rs

use crate::error::PickerError;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

/// Extensions scanned when the config document names none. Matching is case-sensitive.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mkv", ".avi", ".mov", ".webm", ".flv", ".wmv", ".mpg", ".mpeg", ".m4v",
];
/// The filename of the SQLite database holding already picked videos.
pub const HISTORY_DB_FILE_NAME: &str = "picked_videos.db";
/// The filename of the scan configuration inside the app data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Subdirectory of the app data directory receiving the daily log files.
pub const LOG_DIR_NAME: &str = "logs";
/// The application name, used for creating the application-specific data directory.
pub const APP_NAME: &str = "pick_an_idea";
/// Environment variable pointing at the scan configuration document.
pub const CONFIG_ENV_VAR: &str = "PICK_AN_IDEA_CONFIG";

/// The JSON document as written by the user.
#[derive(Deserialize, Debug)]
pub struct ConfigDocument {
    /// Directory → extensions. An empty list falls back to `default_extensions`.
    pub scan_paths: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub default_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub history_db: Option<String>,
}

/// One directory to scan together with the suffixes enabled for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPathConfig {
    pub directory: PathBuf,
    pub extensions: Vec<String>,
}

/// Resolved configuration, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub scan_paths: Vec<ScanPathConfig>,
    /// Descend into subdirectories. Off by default; applies to every scan path of a run.
    pub recursive: bool,
    pub history_db: Option<PathBuf>,
}

/// Picks the config document location: the CLI value wins over the
/// environment value, which wins over the default in the app data directory.
pub fn resolve_config_path<F>(
    cli_value: Option<&str>,
    env_value: Option<&str>,
    default_path: F,
) -> Result<PathBuf, PickerError>
where
    F: FnOnce() -> Result<PathBuf, PickerError>,
{
    match cli_value.or(env_value).filter(|v| !v.trim().is_empty()) {
        Some(raw) => Ok(PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())),
        None => default_path(),
    }
}

/// Reads and validates the config document at `path`.
///
/// # Errors
///
/// * `ConfigMissing` if no file exists at `path`.
/// * `ConfigRead` for any other I/O failure.
/// * `ConfigInvalid` if the JSON is malformed, lacks `scan_paths`, or names a
///   path that cannot be expanded.
pub fn load_config(path: &Path) -> Result<AppConfig, PickerError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            return Err(PickerError::ConfigMissing(path.to_path_buf()))
        }
        Err(e) => {
            return Err(PickerError::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let document: ConfigDocument =
        serde_json::from_str(&contents).map_err(|e| PickerError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    document
        .into_app_config()
        .map_err(|reason| PickerError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })
}

impl ConfigDocument {
    /// Expands paths and fills in default extensions.
    pub fn into_app_config(self) -> Result<AppConfig, String> {
        let defaults: Vec<String> = match self.default_extensions {
            Some(list) => normalize_extensions(&list),
            None => Vec::new(),
        };
        let defaults = if defaults.is_empty() {
            VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            defaults
        };

        let mut scan_paths = Vec::with_capacity(self.scan_paths.len());
        for (raw_dir, raw_exts) in &self.scan_paths {
            let extensions = normalize_extensions(raw_exts);
            scan_paths.push(ScanPathConfig {
                directory: expand_path(raw_dir)?,
                extensions: if extensions.is_empty() {
                    defaults.clone()
                } else {
                    extensions
                },
            });
        }

        let history_db = match self.history_db.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(expand_path(raw)?),
            _ => None,
        };

        Ok(AppConfig {
            scan_paths,
            recursive: self.recursive,
            history_db,
        })
    }
}

/// Expands `~` and environment variables in a configured path.
pub fn expand_path(raw: &str) -> Result<PathBuf, String> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|e| format!("cannot expand path '{}': {}", raw, e))
}

/// Trims, drops blanks, and adds the leading dot where it is missing.
fn normalize_extensions(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for ext in raw {
        let ext = ext.trim();
        if ext.is_empty() || ext == "." {
            continue;
        }
        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };
        if !out.contains(&ext) {
            out.push(ext);
        }
    }
    out
}
