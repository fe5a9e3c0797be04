// src/history_manager.rs

use crate::error::PickerError;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::{params, types::Type, Connection, TransactionBehavior};
use std::{collections::HashSet, fs, path::Path};

const SCHEMA_VERSION: i64 = 1;

/// A previously picked video as stored in the history database.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The full path to the video file that was picked.
    pub path: String,
    /// When it was picked. Rows written by older tools carry no timestamp.
    pub picked_at: Option<DateTime<Utc>>,
}

/// Durable set of picked file paths, backed by a single SQLite table.
/// Every mutation runs in its own transaction.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Opens (or creates) the history database at `path`, creating parent
    /// directories as needed. Opening an existing database leaves its rows untouched.
    pub fn open(path: &Path) -> Result<Self, PickerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PickerError::StorageInit {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        let conn = Connection::open(path)?;
        let store = HistoryStore { conn };
        store.migrate_schema()?;
        debug!("History database opened at '{}'.", path.display());
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, PickerError> {
        let conn = Connection::open_in_memory()?;
        let store = HistoryStore { conn };
        store.migrate_schema()?;
        Ok(store)
    }

    /// Creates the table when absent. Tables created without `picked_at`
    /// get the column added; existing rows keep a NULL timestamp.
    fn migrate_schema(&self) -> Result<(), PickerError> {
        self.conn.execute_batch(
            "PRAGMA busy_timeout = 5000;
             CREATE TABLE IF NOT EXISTS picked_videos (
                 id INTEGER PRIMARY KEY,
                 filename TEXT NOT NULL UNIQUE,
                 picked_at TEXT
             );",
        )?;

        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version >= SCHEMA_VERSION {
            return Ok(());
        }

        let has_picked_at: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info('picked_videos') WHERE name = 'picked_at'",
            [],
            |row| row.get(0),
        )?;
        if has_picked_at == 0 {
            debug!("Adding picked_at column to legacy history table");
            self.conn
                .execute_batch("ALTER TABLE picked_videos ADD COLUMN picked_at TEXT;")?;
        }
        self.conn
            .execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))?;
        Ok(())
    }

    /// Records `path` as picked. Returns `false` when it was already recorded;
    /// the stored set is unchanged in that case.
    pub fn add(&mut self, path: &str) -> Result<bool, PickerError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let inserted = tx.execute(
            "INSERT INTO picked_videos (filename, picked_at) VALUES (?1, ?2) \
             ON CONFLICT(filename) DO NOTHING",
            params![path, Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)],
        )?;
        tx.commit()?;

        if inserted == 0 {
            debug!("'{}' is already in the history, ignoring.", path);
        }
        Ok(inserted > 0)
    }

    /// Every recorded path.
    pub fn all(&self) -> Result<HashSet<String>, PickerError> {
        let mut stmt = self.conn.prepare("SELECT filename FROM picked_videos")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut picked = HashSet::new();
        for row in rows {
            picked.insert(row?);
        }
        Ok(picked)
    }

    /// The most recent `limit` entries, newest first. Untimestamped rows sort last.
    pub fn entries(&self, limit: usize) -> Result<Vec<HistoryEntry>, PickerError> {
        let mut stmt = self.conn.prepare(
            "SELECT filename, picked_at FROM picked_videos \
             ORDER BY picked_at IS NULL, picked_at DESC, id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            let path: String = row.get(0)?;
            let picked_at = match row.get::<_, Option<String>>(1)? {
                Some(raw) => Some(
                    DateTime::parse_from_rfc3339(&raw)
                        .map(|ts| ts.with_timezone(&Utc))
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                        })?,
                ),
                None => None,
            };
            Ok(HistoryEntry { path, picked_at })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    pub fn count(&self) -> Result<usize, PickerError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM picked_videos", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Forgets every pick at once. Returns how many rows were removed.
    pub fn clear(&mut self) -> Result<usize, PickerError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM picked_videos", [])?;
        tx.commit()?;
        debug!("History cleared ({} entries removed).", removed);
        Ok(removed)
    }
}
