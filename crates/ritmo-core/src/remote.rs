//! Collaborator traits at the remote service boundary.
//!
//! The remote fitness service and the weekly-plan generator are external
//! collaborators; the orchestrator consumes them through these traits and
//! the transport layer injects concrete implementations. Remote documents
//! stay [`serde_json::Value`]: their schema belongs to the remote service
//! and is not validated here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Blocking client for the remote fitness-tracking service.
///
/// All calls are fallible and should surface failures as
/// [`crate::WorkoutError::Remote`] (or `NotFound` for unknown ids);
/// timeouts are a property of the implementation, not specified here.
pub trait RemoteClient {
    /// Uploads a workout definition; the response must carry `workoutId`.
    fn upload_workout(&self, payload: &Value) -> Result<Value>;

    /// Fetches the full remote definition of a workout.
    fn get_workout_by_id(&self, workout_id: &str) -> Result<Value>;

    /// Schedules an uploaded workout on a calendar date (ISO `YYYY-MM-DD`).
    fn schedule_workout(&self, workout_id: &str, date: &str) -> Result<Value>;

    /// Replaces a workout definition in place.
    fn update_workout(&self, workout_id: &str, payload: &Value) -> Result<()>;

    /// Deletes a workout from the remote service.
    fn delete_workout(&self, workout_id: &str) -> Result<()>;

    /// Pages through the remote workout library.
    fn list_workouts(&self, start: u32, limit: u32) -> Result<Value>;
}

/// One scheduling outcome produced by the weekly-plan generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlanItem {
    /// `success` or a generator-specific failure marker
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_name: Option<String>,
    /// ISO date the item was (or would be) scheduled on
    pub scheduled_date: String,
    /// Remote id of the created workout; absent on failures and dry runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
}

impl WeekPlanItem {
    /// Whether this item represents a successfully scheduled workout.
    pub fn succeeded(&self) -> bool {
        self.status == "success"
    }
}

/// Generator producing the weekly training plan.
pub trait WeekPlanGenerator {
    /// Plans (or applies) the week anchored on `reference_date`.
    fn generate(&self, reference_date: jiff::civil::Date, dry_run: bool)
        -> Result<Vec<WeekPlanItem>>;
}
