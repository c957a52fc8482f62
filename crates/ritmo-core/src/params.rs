//! Parameter structures for workout operations.
//!
//! These are the framework-free structures shared by every interface layer.
//! Transport layers (MCP, CLI) wrap them with their own derives; with the
//! `schema` feature enabled they additionally generate JSON schemas for tool
//! registration.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkoutError};
use crate::models::StepDescriptor;

/// Validates an ISO `YYYY-MM-DD` date parameter and returns it normalized.
pub fn parse_iso_date(field: &str, value: Option<&str>) -> Result<String> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Err(WorkoutError::validation(field, "is required (YYYY-MM-DD)"));
    };
    raw.parse::<jiff::civil::Date>()
        .map(|date| date.to_string())
        .map_err(|_| WorkoutError::validation(field, "must use YYYY-MM-DD format"))
}

/// Parameters for creating and scheduling a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct CreateWorkout {
    /// Workout name (required)
    pub name: Option<String>,
    /// ISO date to schedule the workout on (required)
    pub date: Option<String>,
    /// Detailed description; required unless structured steps are supplied
    pub description: Option<String>,
    /// Sport category token (RUNNING, STRENGTH, CARDIO, HIIT)
    pub sport_type: Option<String>,
    /// Requested duration in minutes, used when steps carry no estimate
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,
    /// Structured or shorthand step descriptors
    pub steps: Option<Vec<StepDescriptor>>,
}

pub(crate) fn default_duration_minutes() -> i64 {
    45
}

impl Default for CreateWorkout {
    fn default() -> Self {
        Self {
            name: None,
            date: None,
            description: None,
            sport_type: None,
            duration_minutes: default_duration_minutes(),
            steps: None,
        }
    }
}

/// Parameters for updating an existing workout.
///
/// Only the supplied fields change; structured steps, when present, fully
/// replace the remote step tree. Changing the date is destructive (the
/// workout is recreated under a new id).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct UpdateWorkout {
    /// Id of the workout to update (required)
    pub workout_id: Option<String>,
    /// New scheduled date; triggers the destructive replace path
    pub date: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sport_type: Option<String>,
    /// Fallback duration in minutes when the remote estimate is unusable
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,
    pub steps: Option<Vec<StepDescriptor>>,
}

/// Parameters for deleting a workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct DeleteWorkout {
    /// Id of the workout to delete (required)
    pub workout_id: Option<String>,
}

/// Parameters for listing locally indexed scheduled workouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ListScheduled {
    /// Inclusive range start (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive range end (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Entry status filter: active (default), deleted, or all
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

fn default_status() -> String {
    "active".to_string()
}

fn default_list_limit() -> usize {
    100
}

impl Default for ListScheduled {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            status: default_status(),
            limit: default_list_limit(),
        }
    }
}

/// Parameters for listing the remote workout library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ListLibrary {
    /// Pagination offset into the remote library
    #[serde(default)]
    pub start: u32,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
    /// Optional sport filter applied to the remote results
    pub sport_type: Option<String>,
}

impl Default for ListLibrary {
    fn default() -> Self {
        Self {
            start: 0,
            limit: default_list_limit(),
            sport_type: None,
        }
    }
}

/// Parameters for applying the weekly plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ApplyWeekPlan {
    /// Reference date the week is anchored on; defaults to today
    pub from_date: Option<String>,
    /// Plan without touching the remote service or the index
    #[serde(default)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_are_normalized() {
        assert_eq!(
            parse_iso_date("date", Some("2026-03-02")).unwrap(),
            "2026-03-02"
        );
        assert!(parse_iso_date("date", Some("02/03/2026")).is_err());
        assert!(parse_iso_date("date", Some("  ")).is_err());
        assert!(parse_iso_date("date", None).is_err());
    }

    #[test]
    fn create_params_default_duration() {
        let params: CreateWorkout = serde_json::from_str("{}").unwrap();
        assert_eq!(params.duration_minutes, 45);
    }

    #[test]
    fn list_params_defaults() {
        let params: ListScheduled = serde_json::from_str("{}").unwrap();
        assert_eq!(params.status, "active");
        assert_eq!(params.limit, 100);
    }
}
