//! The `create` and `delete` actions.

use log::{debug, warn};
use serde_json::Value;

use super::{Orchestrator, INDEX_SOURCE};
use crate::compiler::build_workout_payload;
use crate::error::{Result, WorkoutError};
use crate::index::EntryDraft;
use crate::params::{parse_iso_date, CreateWorkout, DeleteWorkout};
use crate::results::{CreateOutcome, DeleteOutcome, STATUS_SUCCESS};
use crate::vocab::SportKind;

/// Description applied when structured steps arrive without one.
pub(crate) const STRUCTURED_DESCRIPTION: &str = "Entrenament estructurat";

const HIIT_CREATE_NOTICE: &str = "El servei remot no persisteix de forma fiable workouts \
     personalitzats amb tipus HIIT. S'ha aplicat cardio_training per assegurar que la sessio \
     es cree i funcione al calendari.";

impl Orchestrator {
    /// Creates a workout, schedules it on the requested date, and records
    /// it in the local index.
    ///
    /// A failed upload or a response without a workout id leaves the index
    /// untouched.
    pub fn create(&self, params: &CreateWorkout) -> Result<CreateOutcome> {
        let target_date = parse_iso_date("date", params.date.as_deref())?;
        let name = params
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| WorkoutError::validation("name", "is required"))?;

        let has_structured_steps = params.steps.is_some();
        let description = match params
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        {
            Some(text) => text.to_string(),
            None if has_structured_steps => STRUCTURED_DESCRIPTION.to_string(),
            None => return Err(WorkoutError::validation("description", "is required")),
        };

        let requested = SportKind::resolve_or(params.sport_type.as_deref(), SportKind::Strength)?;
        let (applied, warning) = substitute_hiit(requested, HIIT_CREATE_NOTICE);
        debug!("create workout '{name}' on {target_date} as {}", applied.key());

        let plan = build_workout_payload(
            name,
            &description,
            applied,
            params.duration_minutes,
            params.steps.as_deref(),
        )?;
        let upload_response = self.client.upload_workout(&plan.to_value())?;
        let workout_id = extract_workout_id(&upload_response).ok_or_else(|| {
            WorkoutError::remote("upload_workout", "response did not include workoutId")
        })?;

        let schedule_response = self.client.schedule_workout(&workout_id, &target_date)?;

        let sport_key = applied.key();
        self.index.upsert(EntryDraft {
            workout_id: workout_id.clone(),
            workout_name: name.to_string(),
            description: description.clone(),
            date: target_date.clone(),
            sport_type: sport_key.to_string(),
            status: None,
            last_action: "create".to_string(),
            source: INDEX_SOURCE.to_string(),
        })?;

        Ok(CreateOutcome {
            status: STATUS_SUCCESS,
            action: "create",
            workout_id,
            workout_name: name.to_string(),
            scheduled_date: target_date,
            sport_type: sport_key.to_string(),
            requested_sport_type: requested.key().to_string(),
            applied_sport_type: sport_key.to_string(),
            structured_steps_applied: has_structured_steps,
            message: "Workout creat i programat correctament.".to_string(),
            schedule_response,
            warning,
        })
    }

    /// Deletes a workout remotely and soft-deletes its index entry.
    ///
    /// The remote delete is authoritative: once it succeeds, an index
    /// failure is logged rather than surfaced.
    pub fn delete(&self, params: &DeleteWorkout) -> Result<DeleteOutcome> {
        let workout_id = required_workout_id(params.workout_id.as_deref())?;
        debug!("delete workout {workout_id}");

        self.client.delete_workout(&workout_id)?;
        if let Err(error) = self.index.mark_deleted(&workout_id, "delete") {
            warn!("workout {workout_id} deleted remotely but index update failed: {error}");
        }

        Ok(DeleteOutcome {
            status: STATUS_SUCCESS,
            action: "delete",
            workout_id,
            message: "Workout eliminat correctament.".to_string(),
        })
    }
}

/// Validates the workout id parameter shared by update and delete.
pub(crate) fn required_workout_id(value: Option<&str>) -> Result<String> {
    value
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| WorkoutError::validation("workout_id", "is required"))
}

/// Pulls the workout id out of a remote response; ids arrive as either
/// JSON numbers or strings.
pub(crate) fn extract_workout_id(response: &Value) -> Option<String> {
    match response.get("workoutId")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Replaces an incompatible HIIT request with cardio, carrying a notice.
pub(crate) fn substitute_hiit(requested: SportKind, notice: &str) -> (SportKind, Option<String>) {
    if requested == SportKind::Hiit {
        (SportKind::Cardio, Some(notice.to_string()))
    } else {
        (requested, None)
    }
}
