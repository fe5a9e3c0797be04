// src/ui.rs

use crate::history_manager::HistoryEntry;
use crate::picker::PickOutcome;
use chrono::{DateTime, Local}; // Use Local timezone for display purposes.
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

/// One line of the history listing: file name and local pick time.
pub fn format_history_entry(entry: &HistoryEntry) -> String {
    let file_name = PathBuf::from(&entry.path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.path.clone()); // Fallback to full path if filename cannot be extracted.
    match entry.picked_at {
        Some(picked_at) => format!(
            "{} (picked on {})\n    {}",
            file_name,
            DateTime::<Local>::from(picked_at).format("%Y-%m-%d %H:%M"),
            entry.path
        ),
        None => format!("{} (pick time unknown)\n    {}", file_name, entry.path),
    }
}

/// Prints the history listing, most recent first.
pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("--- History is empty ---");
        return;
    }
    println!("--- Picked videos (recent first, max {}) ---", entries.len());
    for entry in entries {
        println!("{}", format_history_entry(entry));
    }
}

/// The line shown to the user after a pick run.
pub fn describe_outcome(outcome: &PickOutcome) -> String {
    match outcome {
        PickOutcome::Reset { cleared } => format!(
            "All videos have been picked, clearing the memory ({} entries)...",
            cleared
        ),
        PickOutcome::Picked {
            path,
            launched,
            cycle_complete,
        } => {
            let mut line = format!("Picked video: {}", path.display());
            if !launched {
                line.push_str(" (could not be opened, locate it manually)");
            }
            if *cycle_complete {
                line.push_str("\nThat was the last unpicked video, the history has been reset.");
            }
            line
        }
    }
}

pub fn print_status(candidates: usize, picked: usize, remaining: usize) {
    println!("Candidates: {}", candidates);
    println!("Picked:     {}", picked);
    println!("Remaining:  {}", remaining);
}

/// Asks before wiping the history.
///
/// # Errors
///
/// Returns an error if the dialoguer interaction fails.
pub fn confirm_reset(theme: &ColorfulTheme, picked: usize) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(theme)
        .with_prompt(format!("Forget all {} picked videos?", picked))
        .default(false)
        .interact()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_history_entry_shows_name_and_path() {
        let entry = HistoryEntry {
            path: "/videos/ideas/clip.mp4".to_string(),
            picked_at: Some(Utc::now()),
        };
        let line = format_history_entry(&entry);
        assert!(line.starts_with("clip.mp4 (picked on "));
        assert!(line.ends_with("/videos/ideas/clip.mp4"));
    }

    #[test]
    fn test_format_history_entry_without_timestamp() {
        let entry = HistoryEntry {
            path: "/videos/old.mp4".to_string(),
            picked_at: None,
        };
        assert!(format_history_entry(&entry).contains("pick time unknown"));
    }

    #[test]
    fn test_describe_outcome() {
        let reset = describe_outcome(&PickOutcome::Reset { cleared: 3 });
        assert!(reset.contains("All videos have been picked"));

        let last = describe_outcome(&PickOutcome::Picked {
            path: PathBuf::from("/v/c.mp4"),
            launched: false,
            cycle_complete: true,
        });
        assert!(last.starts_with("Picked video: /v/c.mp4"));
        assert!(last.contains("could not be opened"));
        assert!(last.contains("history has been reset"));
    }
}
