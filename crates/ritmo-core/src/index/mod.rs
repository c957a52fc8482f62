//! Local index of scheduled workouts.
//!
//! One JSON document per configured path, owned exclusively by this module.
//! Every operation is a read-modify-write cycle serialized behind a single
//! process-wide mutex, and every write goes to a temporary file followed by
//! an atomic rename so readers never observe a half-written document.
//! Concurrent writers across processes remain last-writer-wins; that is
//! accepted, not solved.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use jiff::civil::Date;
use jiff::Timestamp;
use log::{debug, warn};

use crate::error::{Result, WorkoutError};
use crate::models::{EntryStatus, IndexEntry, StatusFilter, Store, INDEX_SCHEMA_VERSION};

/// Serializes all store access within the process.
static STORE_LOCK: Mutex<()> = Mutex::new(());

fn store_guard() -> MutexGuard<'static, ()> {
    // A poisoned lock only means another operation panicked mid-cycle; the
    // on-disk document is still consistent thanks to atomic replace.
    STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Fields accepted for an upsert. Timestamps and merge behavior are owned
/// by the index itself.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub workout_id: String,
    pub workout_name: String,
    pub description: String,
    pub date: String,
    pub sport_type: String,
    pub status: Option<EntryStatus>,
    pub last_action: String,
    pub source: String,
}

/// Handle on one scheduled-workout index document.
#[derive(Debug, Clone)]
pub struct WorkoutIndex {
    path: PathBuf,
}

impl WorkoutIndex {
    /// Creates an index handle for the given document path. The file is
    /// created lazily on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the underlying document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole store. A missing, unreadable, or malformed document
    /// yields a default empty store; this never fails.
    pub fn load(&self) -> Store {
        let _guard = store_guard();
        self.read_unlocked()
    }

    /// Inserts or merges an entry keyed by its workout id.
    ///
    /// `createdAt` is preserved from the existing row, `updatedAt` always
    /// refreshes, and `status` defaults to active on first insert. The whole
    /// document is rewritten atomically.
    pub fn upsert(&self, draft: EntryDraft) -> Result<IndexEntry> {
        let workout_id = draft.workout_id.trim().to_string();
        if workout_id.is_empty() {
            return Err(WorkoutError::validation("workoutId", "is required"));
        }

        let _guard = store_guard();
        let mut store = self.read_unlocked();
        let now = Timestamp::now();

        let merged = match store
            .items
            .iter_mut()
            .find(|item| item.workout_id == workout_id)
        {
            Some(existing) => {
                existing.workout_name = draft.workout_name;
                existing.description = draft.description;
                existing.date = draft.date;
                existing.sport_type = draft.sport_type;
                existing.status = draft.status.unwrap_or(existing.status);
                existing.last_action = draft.last_action;
                existing.source = draft.source;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let entry = IndexEntry {
                    workout_id,
                    workout_name: draft.workout_name,
                    description: draft.description,
                    date: draft.date,
                    sport_type: draft.sport_type,
                    status: draft.status.unwrap_or_default(),
                    last_action: draft.last_action,
                    source: draft.source,
                    created_at: now,
                    updated_at: now,
                };
                store.items.push(entry.clone());
                entry
            }
        };

        self.write_unlocked(&mut store)?;
        Ok(merged)
    }

    /// Soft-deletes an entry; the row is never physically removed.
    /// Returns `None` when the id is absent.
    pub fn mark_deleted(&self, workout_id: &str, reason: &str) -> Result<Option<IndexEntry>> {
        let normalized_id = workout_id.trim();
        if normalized_id.is_empty() {
            return Err(WorkoutError::validation("workoutId", "is required"));
        }

        let _guard = store_guard();
        let mut store = self.read_unlocked();

        let Some(entry) = store
            .items
            .iter_mut()
            .find(|item| item.workout_id == normalized_id)
        else {
            return Ok(None);
        };

        entry.status = EntryStatus::Deleted;
        entry.last_action = reason.to_string();
        entry.updated_at = Timestamp::now();
        let updated = entry.clone();

        self.write_unlocked(&mut store)?;
        Ok(Some(updated))
    }

    /// Lists entries filtered by inclusive date range and status, sorted
    /// ascending by (date, updatedAt). Rows whose date no longer parses are
    /// silently excluded. `limit` is clamped to `[1, 1000]`.
    pub fn list(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
        status: StatusFilter,
        limit: usize,
    ) -> Result<Vec<IndexEntry>> {
        let limit = limit.clamp(1, 1000);
        let start = start_date.map(|raw| parse_date("start_date", raw)).transpose()?;
        let end = end_date.map(|raw| parse_date("end_date", raw)).transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(WorkoutError::validation(
                    "start_date",
                    "must be before or equal to end_date",
                ));
            }
        }

        let items = {
            let _guard = store_guard();
            self.read_unlocked().items
        };

        let mut filtered: Vec<IndexEntry> = items
            .into_iter()
            .filter(|item| status.matches(item.status))
            .filter(|item| {
                let Ok(item_date) = item.date.parse::<Date>() else {
                    return false;
                };
                start.is_none_or(|start| item_date >= start)
                    && end.is_none_or(|end| item_date <= end)
            })
            .collect();

        filtered.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.updated_at.cmp(&b.updated_at))
        });
        filtered.truncate(limit);
        Ok(filtered)
    }

    /// Point lookup by workout id.
    pub fn get(&self, workout_id: &str) -> Result<Option<IndexEntry>> {
        let normalized_id = workout_id.trim();
        if normalized_id.is_empty() {
            return Err(WorkoutError::validation("workoutId", "is required"));
        }

        let _guard = store_guard();
        Ok(self
            .read_unlocked()
            .items
            .into_iter()
            .find(|item| item.workout_id == normalized_id))
    }

    fn read_unlocked(&self) -> Store {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Store::default();
            }
            Err(error) => {
                warn!(
                    "unreadable workout index at {}: {error}; starting empty",
                    self.path.display()
                );
                return Store::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(store) => store,
            Err(error) => {
                // Self-healing: the next write replaces the corrupt document.
                warn!(
                    "corrupt workout index at {}: {error}; starting empty",
                    self.path.display()
                );
                Store::default()
            }
        }
    }

    /// Writes the whole document via temp file + atomic rename.
    fn write_unlocked(&self, store: &mut Store) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| WorkoutError::file_system(parent, error))?;
            }
        }

        store.schema_version = INDEX_SCHEMA_VERSION;
        store.updated_at = Timestamp::now();

        let payload = serde_json::to_string_pretty(store)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, payload)
            .map_err(|error| WorkoutError::file_system(&temp_path, error))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|error| WorkoutError::file_system(&self.path, error))?;

        debug!("wrote workout index ({} items)", store.items.len());
        Ok(())
    }
}

fn parse_date(field: &str, raw: &str) -> Result<Date> {
    raw.parse::<Date>()
        .map_err(|_| WorkoutError::validation(field, "must use YYYY-MM-DD format"))
}
