//! The `update` action: no-op, in-place, and destructive-replace paths.

use log::{debug, warn};
use serde_json::Value;

use super::lifecycle::{
    extract_workout_id, required_workout_id, substitute_hiit, STRUCTURED_DESCRIPTION,
};
use super::{Orchestrator, INDEX_SOURCE};
use crate::compiler::payload::{bounded, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::compiler::{apply_sport, build_workout_payload, sanitize_for_update, sanitize_for_upload};
use crate::error::{Result, WorkoutError};
use crate::index::EntryDraft;
use crate::params::{parse_iso_date, UpdateWorkout};
use crate::results::{UpdateOutcome, STATUS_SUCCESS};
use crate::vocab::SportKind;

const HIIT_UPDATE_NOTICE: &str = "El servei remot no persisteix de forma fiable workouts \
     personalitzats amb tipus HIIT. S'ha aplicat cardio_training per assegurar compatibilitat.";

const DESCRIPTION_WITHOUT_STEPS_NOTICE: &str = "S'ha actualitzat la descripcio, pero \
     l'estructura interna del workout no canvia si no envies `steps`.";

impl Orchestrator {
    /// Updates a workout. Only supplied fields change; a date change is
    /// destructive (upload replacement, schedule it, delete the old remote
    /// workout), everything else is an in-place replace of the remote
    /// definition.
    pub fn update(&self, params: &UpdateWorkout) -> Result<UpdateOutcome> {
        let workout_id = required_workout_id(params.workout_id.as_deref())?;
        debug!("update workout {workout_id}");

        let current = self.client.get_workout_by_id(&workout_id)?;
        let current_name = string_field(&current, "workoutName").unwrap_or("Workout");
        let current_description = string_field(&current, "description").unwrap_or("");
        let current_sport_key = sport_key_of(&current).unwrap_or("strength_training");
        let current_sport = SportKind::resolve_or(Some(current_sport_key), SportKind::Strength)?;

        let index_entry = self.index.get(&workout_id)?;
        let current_date = index_entry.map(|entry| entry.date);
        let target_date = match params.date.as_deref() {
            Some(raw) => Some(parse_iso_date("date", Some(raw))?),
            None => current_date.clone(),
        };

        let new_name = params
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(current_name)
            .to_string();
        let has_structured_steps = params.steps.is_some();
        let mut new_description = params
            .description
            .clone()
            .unwrap_or_else(|| current_description.to_string());
        if has_structured_steps && new_description.trim().is_empty() {
            new_description = STRUCTURED_DESCRIPTION.to_string();
        }

        let requested = SportKind::resolve_or(params.sport_type.as_deref(), current_sport)?;
        let (applied, hiit_notice) = substitute_hiit(requested, HIIT_UPDATE_NOTICE);
        let steps_notice = (params.description.is_some() && !has_structured_steps)
            .then(|| DESCRIPTION_WITHOUT_STEPS_NOTICE.to_string());
        let warning = merge_warnings(hiit_notice, steps_notice);

        let mut changed_fields: Vec<&'static str> = Vec::new();
        if new_name != current_name {
            changed_fields.push("name");
        }
        if new_description != current_description {
            changed_fields.push("description");
        }
        if applied != current_sport {
            changed_fields.push("sport_type");
        }
        let date_changed = target_date.is_some() && target_date != current_date;
        if date_changed {
            changed_fields.push("date");
        }
        if has_structured_steps {
            changed_fields.push("steps");
        }

        if changed_fields.is_empty() {
            return Ok(UpdateOutcome {
                status: STATUS_SUCCESS,
                action: "update",
                workout_id,
                old_workout_id: None,
                changed_fields,
                scheduled_date: None,
                requested_sport_type: requested.key().to_string(),
                applied_sport_type: applied.key().to_string(),
                structured_steps_applied: false,
                message: "No hi ha canvis per aplicar.".to_string(),
                schedule_response: None,
                warning,
            });
        }

        let duration_minutes = infer_duration_minutes(&current, params.duration_minutes);
        let structured_plan = params
            .steps
            .as_deref()
            .map(|steps| {
                build_workout_payload(
                    &new_name,
                    &new_description,
                    applied,
                    duration_minutes,
                    Some(steps),
                )
            })
            .transpose()?;

        if date_changed {
            let target_date = target_date.ok_or_else(|| {
                WorkoutError::validation("date", "no target date could be resolved")
            })?;

            let mut upload_payload = match &structured_plan {
                Some(plan) => plan.to_value(),
                None => {
                    let mut payload = sanitize_for_upload(&current);
                    set_string(&mut payload, "workoutName", &new_name);
                    set_string(&mut payload, "description", &new_description);
                    apply_sport(&mut payload, applied);
                    payload
                }
            };
            // Structured plans already carry the applied sport; this keeps
            // the per-segment labels consistent either way.
            apply_sport(&mut upload_payload, applied);

            let created = self.client.upload_workout(&upload_payload)?;
            let new_workout_id = extract_workout_id(&created).ok_or_else(|| {
                WorkoutError::remote(
                    "upload_workout",
                    "replacement upload did not return workoutId",
                )
            })?;

            let schedule_response = self.client.schedule_workout(&new_workout_id, &target_date)?;
            if let Err(error) = self.client.delete_workout(&workout_id) {
                warn!("replacement {new_workout_id} scheduled but deleting {workout_id} failed: {error}");
            }

            self.index.mark_deleted(&workout_id, "replaced")?;
            self.index.upsert(EntryDraft {
                workout_id: new_workout_id.clone(),
                workout_name: new_name,
                description: new_description,
                date: target_date.clone(),
                sport_type: applied.key().to_string(),
                status: None,
                last_action: "update".to_string(),
                source: INDEX_SOURCE.to_string(),
            })?;

            return Ok(UpdateOutcome {
                status: STATUS_SUCCESS,
                action: "update",
                workout_id: new_workout_id,
                old_workout_id: Some(workout_id),
                changed_fields,
                scheduled_date: Some(target_date),
                requested_sport_type: requested.key().to_string(),
                applied_sport_type: applied.key().to_string(),
                structured_steps_applied: has_structured_steps,
                message: "Workout actualitzat i reprogramat amb reemplacament intern.".to_string(),
                schedule_response: Some(schedule_response),
                warning,
            });
        }

        let mut update_payload = sanitize_for_update(&current);
        match &structured_plan {
            Some(plan) => {
                merge_plan_fields(&mut update_payload, &plan.to_value());
            }
            None => {
                set_string(&mut update_payload, "workoutName", &new_name);
                set_string(&mut update_payload, "description", &new_description);
            }
        }
        apply_sport(&mut update_payload, applied);
        self.client.update_workout(&workout_id, &update_payload)?;

        if let Some(date) = &current_date {
            self.index.upsert(EntryDraft {
                workout_id: workout_id.clone(),
                workout_name: new_name,
                description: new_description,
                date: date.clone(),
                sport_type: applied.key().to_string(),
                status: None,
                last_action: "update".to_string(),
                source: INDEX_SOURCE.to_string(),
            })?;
        }

        Ok(UpdateOutcome {
            status: STATUS_SUCCESS,
            action: "update",
            workout_id,
            old_workout_id: None,
            changed_fields,
            scheduled_date: current_date,
            requested_sport_type: requested.key().to_string(),
            applied_sport_type: applied.key().to_string(),
            structured_steps_applied: has_structured_steps,
            message: "Workout actualitzat correctament.".to_string(),
            schedule_response: None,
            warning,
        })
    }
}

/// Derives the fallback duration for a rebuilt plan from the remote
/// estimate, clamped to the accepted range.
fn infer_duration_minutes(workout: &Value, fallback_minutes: i64) -> i64 {
    let estimated_seconds = match workout.get("estimatedDurationInSecs") {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0) as i64,
        Some(Value::String(raw)) => raw.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    if estimated_seconds <= 0 {
        return bounded(fallback_minutes, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);
    }
    let estimated_minutes = ((estimated_seconds as f64) / 60.0).round().max(1.0) as i64;
    bounded(estimated_minutes, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
}

/// Joins non-empty warning fragments with a single space.
fn merge_warnings(first: Option<String>, second: Option<String>) -> Option<String> {
    let parts: Vec<String> = [first, second]
        .into_iter()
        .flatten()
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn merge_plan_fields(target: &mut Value, plan: &Value) {
    let (Value::Object(target), Value::Object(plan)) = (target, plan) else {
        return;
    };
    for field in [
        "workoutName",
        "description",
        "estimatedDurationInSecs",
        "workoutSegments",
        "sportType",
    ] {
        if let Some(value) = plan.get(field) {
            target.insert(field.to_string(), value.clone());
        }
    }
}

fn set_string(document: &mut Value, field: &str, value: &str) {
    if let Value::Object(map) = document {
        map.insert(field.to_string(), Value::String(value.to_string()));
    }
}

/// Extracts a non-empty string field from a remote document.
pub(crate) fn string_field<'a>(document: &'a Value, field: &str) -> Option<&'a str> {
    document
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Extracts `sportType.sportTypeKey` from a remote document.
pub(crate) fn sport_key_of(document: &Value) -> Option<&str> {
    document
        .get("sportType")
        .and_then(|sport| sport.get("sportTypeKey"))
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
}
