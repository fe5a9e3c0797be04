// src/file_utils.rs

use crate::config::{ScanPathConfig, APP_NAME, CONFIG_FILE_NAME, HISTORY_DB_FILE_NAME, LOG_DIR_NAME};
use crate::error::PickerError;
use log::{debug, info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

/// Returns the full path to the application's data directory.
/// This function creates the directory if it does not already exist.
///
/// # Errors
///
/// Returns an error if the system's data directory cannot be determined
/// or if creating the application data directory fails.
pub fn get_app_data_dir() -> Result<PathBuf, PickerError> {
    let data_dir_base = dirs::data_dir().ok_or(PickerError::DataDir)?;
    let app_data_dir = data_dir_base.join(APP_NAME);

    fs::create_dir_all(&app_data_dir).map_err(|e| PickerError::StorageInit {
        path: app_data_dir.clone(),
        source: e,
    })?;

    Ok(app_data_dir)
}

/// Default location of the history database, inside the app data directory.
pub fn get_history_db_path() -> Result<PathBuf, PickerError> {
    Ok(get_app_data_dir()?.join(HISTORY_DB_FILE_NAME))
}

/// Default location of the config document, inside the app data directory.
pub fn get_config_path() -> Result<PathBuf, PickerError> {
    Ok(get_app_data_dir()?.join(CONFIG_FILE_NAME))
}

pub fn get_log_dir() -> Result<PathBuf, PickerError> {
    Ok(get_app_data_dir()?.join(LOG_DIR_NAME))
}

/// Lists the files in `folder_path` whose name ends with one of `extensions`.
/// The suffix test is case-sensitive.
///
/// A folder that does not exist (or is not a directory) yields nothing and a
/// logged notice. Entries that cannot be read are logged and skipped, so the
/// scan itself never fails. Results are absolute paths, oldest modification
/// time first, ties broken by path.
///
/// # Arguments
///
/// * `folder_path` - The directory to scan.
/// * `extensions` - Accepted suffixes, including the leading dot.
/// * `recursive` - If true, subdirectories are scanned; otherwise only the top-level directory.
pub fn find_video_files(folder_path: &Path, extensions: &[String], recursive: bool) -> Vec<PathBuf> {
    if !folder_path.is_dir() {
        info!(
            "Scan directory '{}' does not exist, skipping it.",
            folder_path.display()
        );
        return Vec::new();
    }

    let root = std::path::absolute(folder_path).unwrap_or_else(|_| folder_path.to_path_buf());

    let walker = WalkDir::new(&root).min_depth(1);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    let mut video_files: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under '{}': {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() && !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if extensions.iter().any(|ext| file_name.ends_with(ext.as_str())) {
            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            video_files.push((modified, entry.into_path()));
        }
    }
    video_files.sort();

    debug!(
        "Found {} matching file(s) in '{}'.",
        video_files.len(),
        root.display()
    );
    video_files.into_iter().map(|(_, path)| path).collect()
}

/// Scans every configured directory in order and concatenates the results.
/// Overlapping directories may contribute the same path twice.
pub fn scan_directories(scan_paths: &[ScanPathConfig], recursive: bool) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for scan_path in scan_paths {
        candidates.extend(find_video_files(
            &scan_path.directory,
            &scan_path.extensions,
            recursive,
        ));
    }
    info!(
        "Scanned {} director{}, {} candidate file(s).",
        scan_paths.len(),
        if scan_paths.len() == 1 { "y" } else { "ies" },
        candidates.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::{capture_logs, captured_lines};
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn create_with_mtime(path: &Path, secs_since_epoch: u64) {
        let file = File::create(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs_since_epoch))
            .unwrap();
    }

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_find_video_files_flat() {
        let dir = tempdir().unwrap();
        create_with_mtime(&dir.path().join("b.mp4"), 1_000);
        create_with_mtime(&dir.path().join("a.mkv"), 1_000);
        File::create(dir.path().join("notes.txt")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("c.mp4")).unwrap();

        let found = find_video_files(dir.path(), &exts(&[".mp4", ".mkv"]), false);

        assert_eq!(names(&found), vec!["a.mkv", "b.mp4"]);
        assert!(found.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_find_video_files_recursive() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("c.mp4")).unwrap();

        let found = find_video_files(dir.path(), &exts(&[".mp4"]), true);

        assert_eq!(found.len(), 2);
        assert!(found.contains(&dir.path().join("nested").join("c.mp4")));
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("loud.MP4")).unwrap();
        File::create(dir.path().join("quiet.mp4")).unwrap();

        let found = find_video_files(dir.path(), &exts(&[".mp4"]), false);

        assert_eq!(names(&found), vec!["quiet.mp4"]);
    }

    #[test]
    fn test_files_ordered_oldest_first() {
        let dir = tempdir().unwrap();
        create_with_mtime(&dir.path().join("a.mp4"), 3_000);
        create_with_mtime(&dir.path().join("b.mp4"), 1_000);
        create_with_mtime(&dir.path().join("c.mp4"), 2_000);

        let found = find_video_files(dir.path(), &exts(&[".mp4"]), false);

        assert_eq!(names(&found), vec!["b.mp4", "c.mp4", "a.mp4"]);
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let found = find_video_files(&dir.path().join("gone"), &exts(&[".mp4"]), false);
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_directory_logs_notice() {
        capture_logs();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("never-created");

        find_video_files(&missing, &exts(&[".mp4"]), false);

        let expected = format!("'{}' does not exist", missing.display());
        assert!(
            captured_lines()
                .iter()
                .any(|line| line.starts_with("INFO") && line.contains(&expected)),
            "no notice naming {}",
            missing.display()
        );
    }

    #[test]
    fn test_scan_directories_skips_missing_and_keeps_others() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present");
        fs::create_dir(&present).unwrap();
        File::create(present.join("a.mp4")).unwrap();

        let scan_paths = vec![
            ScanPathConfig {
                directory: dir.path().join("absent"),
                extensions: exts(&[".mp4"]),
            },
            ScanPathConfig {
                directory: present.clone(),
                extensions: exts(&[".mp4"]),
            },
        ];

        let found = scan_directories(&scan_paths, false);
        assert_eq!(found, vec![present.join("a.mp4")]);
    }

    #[test]
    fn test_scan_directories_keeps_overlap_duplicates() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        let scan_path = ScanPathConfig {
            directory: dir.path().to_path_buf(),
            extensions: exts(&[".mp4"]),
        };

        let found = scan_directories(&[scan_path.clone(), scan_path], false);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_directories_empty_config() {
        assert!(scan_directories(&[], false).is_empty());
    }
}
