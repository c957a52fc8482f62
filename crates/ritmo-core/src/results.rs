//! Typed result objects returned by orchestrator operations.
//!
//! Every outcome serializes with `status: "success"` and its `action` name;
//! failures travel as [`crate::WorkoutError`] and are formatted by the
//! transport layer. Fields mirror the tool-level surface consumed by
//! calling agents.

use serde::Serialize;
use serde_json::Value;

use crate::remote::WeekPlanItem;

/// Status marker carried by every successful outcome.
pub const STATUS_SUCCESS: &str = "success";

/// Outcome of the `create` action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutcome {
    pub status: &'static str,
    pub action: &'static str,
    pub workout_id: String,
    pub workout_name: String,
    pub scheduled_date: String,
    /// Sport key actually stored, after any compatibility substitution
    pub sport_type: String,
    pub requested_sport_type: String,
    pub applied_sport_type: String,
    pub structured_steps_applied: bool,
    pub message: String,
    pub schedule_response: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Outcome of the `update` action, covering the no-op, in-place, and
/// destructive-replace paths.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub status: &'static str,
    pub action: &'static str,
    /// Surviving id: unchanged for in-place updates, the replacement id
    /// after a date change
    pub workout_id: String,
    /// Set only on the destructive path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_workout_id: Option<String>,
    pub changed_fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    pub requested_sport_type: String,
    pub applied_sport_type: String,
    pub structured_steps_applied: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Outcome of the `delete` action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub status: &'static str,
    pub action: &'static str,
    pub workout_id: String,
    pub message: String,
}

/// Projection of an index entry returned by `list_scheduled`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub workout_id: String,
    pub workout_name: String,
    pub description: String,
    pub date: String,
    pub sport_type: String,
    pub status: &'static str,
    pub updated_at: jiff::Timestamp,
}

/// Outcome of the `list_scheduled` action, served from the local index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScheduledOutcome {
    pub status: &'static str,
    pub action: &'static str,
    pub source: &'static str,
    pub count: usize,
    pub items: Vec<ScheduledItem>,
    pub message: String,
}

/// Outcome of the `list_library` action, served from the remote service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLibraryOutcome {
    pub status: &'static str,
    pub action: &'static str,
    pub count: usize,
    pub items: Vec<Value>,
    pub message: String,
}

/// Outcome of the `apply_week_plan` action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlanOutcome {
    pub status: &'static str,
    pub action: &'static str,
    pub dry_run: bool,
    pub count: usize,
    pub items: Vec<WeekPlanItem>,
    pub message: String,
}
