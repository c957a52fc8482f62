//! Workout plan assembly and remote-document helpers.

use serde_json::Value;

use super::{compile, estimate_total_seconds};
use crate::error::{Result, WorkoutError};
use crate::models::{StepDescriptor, WorkoutPlan, WorkoutSegment};
use crate::shorthand::normalize_round_shorthand;
use crate::vocab::{EndConditionKind, SportKind, StepKind, TargetKind};

/// Bounds accepted for a requested workout duration, in minutes.
pub const MIN_DURATION_MINUTES: i64 = 10;
pub const MAX_DURATION_MINUTES: i64 = 480;

/// Clamps `value` into `[minimum, maximum]`.
pub fn bounded(value: i64, minimum: i64, maximum: i64) -> i64 {
    value.clamp(minimum, maximum)
}

/// Builds the upload payload for a workout.
///
/// With structured steps the round-shorthand normalizer and the compiler
/// run first and the total duration comes from step estimation, falling
/// back to the requested minutes when estimation yields nothing (e.g. all
/// open steps). Without steps a generic warmup / main block / cooldown plan
/// covering the requested duration is produced.
pub fn build_workout_payload(
    name: &str,
    description: &str,
    sport: SportKind,
    duration_minutes: i64,
    steps: Option<&[StepDescriptor]>,
) -> Result<WorkoutPlan> {
    if name.trim().is_empty() {
        return Err(WorkoutError::validation("name", "is required"));
    }
    if description.trim().is_empty() {
        return Err(WorkoutError::validation("description", "is required"));
    }

    let Some(raw_steps) = steps else {
        return Ok(default_block_plan(name, description, sport, duration_minutes));
    };

    let normalized = normalize_round_shorthand(raw_steps);
    let compiled = compile(&normalized)?;

    let estimated_from_steps = estimate_total_seconds(&compiled).round() as i64;
    let fallback_seconds = duration_minutes.max(1) * 60;
    let estimated_seconds = if estimated_from_steps > 0 {
        estimated_from_steps
    } else {
        fallback_seconds
    };

    Ok(WorkoutPlan {
        workout_name: name.to_string(),
        description: description.to_string(),
        estimated_duration_in_secs: estimated_seconds as u64,
        sport_type: sport.wire(),
        workout_segments: vec![WorkoutSegment {
            segment_order: 1,
            sport_type: sport.wire(),
            workout_steps: compiled,
        }],
    })
}

/// Generic three-block plan for callers that supply no step structure.
fn default_block_plan(
    name: &str,
    description: &str,
    sport: SportKind,
    duration_minutes: i64,
) -> WorkoutPlan {
    let duration = bounded(duration_minutes, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);
    let total_seconds = duration * 60;
    let mut warmup_seconds = 5 * 60;
    let mut cooldown_seconds = 5 * 60;
    let mut main_seconds = total_seconds - warmup_seconds - cooldown_seconds;
    if main_seconds < 60 {
        warmup_seconds = 2 * 60;
        cooldown_seconds = 2 * 60;
        main_seconds = total_seconds - warmup_seconds - cooldown_seconds;
    }

    let time_block = |order: u32, kind: StepKind, text: &str, seconds: i64| {
        crate::models::CanonicalStep::Executable(crate::models::canonical::ExecutableStep {
            step_order: order,
            description: text.to_string(),
            step_type: kind.wire(),
            end_condition: EndConditionKind::Time.wire(),
            end_condition_value: Some(seconds as f64),
            target_type: TargetKind::NoTarget.wire(),
        })
    };

    WorkoutPlan {
        workout_name: name.to_string(),
        description: description.to_string(),
        estimated_duration_in_secs: total_seconds as u64,
        sport_type: sport.wire(),
        workout_segments: vec![WorkoutSegment {
            segment_order: 1,
            sport_type: sport.wire(),
            workout_steps: vec![
                time_block(1, StepKind::Warmup, "Escalfament", warmup_seconds),
                time_block(2, StepKind::Interval, "Bloc principal", main_seconds),
                time_block(3, StepKind::Cooldown, "Tornada a la calma", cooldown_seconds),
            ],
        }],
    }
}

/// Strips server-owned fields from a remote definition so it can be
/// re-uploaded as a new workout.
pub fn sanitize_for_upload(workout_detail: &Value) -> Value {
    strip_fields(
        workout_detail,
        &[
            "workoutId",
            "ownerId",
            "createdDate",
            "updateDate",
            "author",
            "consumer",
        ],
    )
}

/// Strips volatile fields from a remote definition for an in-place update,
/// keeping the workout id.
pub fn sanitize_for_update(workout_detail: &Value) -> Value {
    strip_fields(
        workout_detail,
        &["createdDate", "updateDate", "author", "consumer"],
    )
}

fn strip_fields(document: &Value, fields: &[&str]) -> Value {
    let mut payload = document.clone();
    if let Value::Object(map) = &mut payload {
        for field in fields {
            map.remove(*field);
        }
    }
    payload
}

/// Rewrites the top-level and per-segment sport type of a remote document.
pub fn apply_sport(payload: &mut Value, sport: SportKind) {
    let sport_value =
        serde_json::to_value(sport.wire()).unwrap_or(Value::Null);

    let Value::Object(map) = payload else { return };
    map.insert("sportType".to_string(), sport_value.clone());

    if let Some(Value::Array(segments)) = map.get_mut("workoutSegments") {
        for segment in segments {
            if let Value::Object(segment_map) = segment {
                segment_map.insert("sportType".to_string(), sport_value.clone());
            }
        }
    }
}
