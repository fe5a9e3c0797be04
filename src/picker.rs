// src/picker.rs

use crate::error::PickerError;
use crate::history_manager::HistoryStore;
use crate::launcher::Opener;
use log::{error, info};
use rand::prelude::*;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// What to do with the candidates left after filtering out the history.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Nothing left; the history must be cleared.
    Exhausted,
    /// Exactly one left. It is picked and the history is cleared right after.
    Last(PathBuf),
    /// Picked uniformly at random from two or more.
    Random(PathBuf),
}

/// Result of one pick run.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// Every candidate had been picked; the history was wiped.
    Reset { cleared: usize },
    Picked {
        path: PathBuf,
        /// False when the opener failed. The pick stays recorded either way.
        launched: bool,
        /// True when this was the last unpicked file and the history was wiped afterwards.
        cycle_complete: bool,
    },
}

/// The key a path is stored under in the history.
pub fn history_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Candidates not yet in `picked`, in encounter order, each path at most once.
pub fn remaining(candidates: &[PathBuf], picked: &HashSet<String>) -> Vec<PathBuf> {
    let mut seen: HashSet<&Path> = HashSet::with_capacity(candidates.len());
    let mut left = Vec::new();
    for path in candidates {
        if picked.contains(&history_key(path)) {
            continue;
        }
        if seen.insert(path.as_path()) {
            left.push(path.clone());
        }
    }
    left
}

pub fn select(mut remaining: Vec<PathBuf>) -> Selection {
    match remaining.len() {
        0 => Selection::Exhausted,
        1 => Selection::Last(remaining.remove(0)),
        _ => match remaining.choose(&mut rand::rng()) {
            Some(path) => Selection::Random(path.clone()),
            None => Selection::Exhausted,
        },
    }
}

/// Runs one pick against the history: filter, select, record, open.
///
/// When nothing is left the history is cleared and nothing is opened. When
/// the last unpicked file is chosen it is recorded and opened, then the
/// history is cleared so the next run starts a new cycle. A failing opener is
/// logged; the recorded pick is kept.
///
/// # Errors
///
/// Returns an error only if the history store fails.
pub fn pick_next(
    candidates: &[PathBuf],
    store: &mut HistoryStore,
    opener: &dyn Opener,
) -> Result<PickOutcome, PickerError> {
    let picked = store.all()?;
    let left = remaining(candidates, &picked);
    info!(
        "{} candidate(s), {} already picked, {} remaining.",
        candidates.len(),
        picked.len(),
        left.len()
    );

    let (path, cycle_complete) = match select(left) {
        Selection::Exhausted => {
            let cleared = store.clear()?;
            info!("All videos have been picked, cleared {} history entries.", cleared);
            return Ok(PickOutcome::Reset { cleared });
        }
        Selection::Last(path) => (path, true),
        Selection::Random(path) => (path, false),
    };

    store.add(&history_key(&path))?;
    info!("Picked '{}'.", path.display());

    let launched = match opener.open(&path) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to open '{}': {}", path.display(), e);
            false
        }
    };

    if cycle_complete {
        let cleared = store.clear()?;
        info!(
            "'{}' was the last unpicked video, cleared {} history entries.",
            path.display(),
            cleared
        );
    }

    Ok(PickOutcome::Picked {
        path,
        launched,
        cycle_complete,
    })
}
