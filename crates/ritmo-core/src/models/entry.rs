//! Persisted records of scheduled workouts.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::WorkoutError;

/// Schema version written into every store document.
pub const INDEX_SCHEMA_VERSION: u32 = 1;

/// Lifecycle status of an index entry. Entries are never physically
/// removed; deletion flips the status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Deleted,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Active => "active",
            EntryStatus::Deleted => "deleted",
        }
    }
}

/// Status filter accepted by the list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Active,
    Deleted,
    All,
}

impl StatusFilter {
    /// Whether an entry with `status` passes this filter.
    pub fn matches(self, status: EntryStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == EntryStatus::Active,
            StatusFilter::Deleted => status == EntryStatus::Deleted,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(StatusFilter::Active),
            "deleted" => Ok(StatusFilter::Deleted),
            "all" => Ok(StatusFilter::All),
            _ => Err(WorkoutError::validation(
                "status",
                "must be one of: active, deleted, all",
            )),
        }
    }
}

/// One locally indexed scheduled workout.
///
/// The `date` stays a raw string on purpose: the index tolerates rows whose
/// date no longer parses and excludes them from ranged listings instead of
/// failing the whole store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Unique key within the store
    pub workout_id: String,
    pub workout_name: String,
    #[serde(default)]
    pub description: String,
    /// ISO date the workout is scheduled on
    pub date: String,
    /// Resolved sport type wire key
    pub sport_type: String,
    #[serde(default)]
    pub status: EntryStatus,
    /// Last lifecycle action applied to this entry
    #[serde(default)]
    pub last_action: String,
    /// Component that wrote the entry
    #[serde(default)]
    pub source: String,
    /// Set on first insert, preserved across upserts (UTC)
    pub created_at: Timestamp,
    /// Refreshed on every write (UTC)
    pub updated_at: Timestamp,
}

/// The whole persisted document, owned exclusively by the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub schema_version: u32,
    pub updated_at: Timestamp,
    pub items: Vec<IndexEntry>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            schema_version: INDEX_SCHEMA_VERSION,
            updated_at: Timestamp::now(),
            items: Vec::new(),
        }
    }
}
