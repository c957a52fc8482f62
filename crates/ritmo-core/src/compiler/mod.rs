//! Structured step compilation.
//!
//! Turns loosely typed [`StepDescriptor`] trees into the canonical
//! [`CanonicalStep`] representation, resolving vocabulary aliases, inferring
//! absent fields, and validating everything with path-qualified errors.
//! Compilation never partially applies: the first invalid node fails the
//! whole call.

use serde_json::Value;

use crate::error::{Result, WorkoutError};
use crate::models::{CanonicalStep, ExecutableStep, RepeatGroup, StepDescriptor};
use crate::vocab::{normalize_token, EndConditionKind, EndConditionRef, StepKind, TargetKind};

pub mod payload;

pub use payload::{apply_sport, build_workout_payload, sanitize_for_update, sanitize_for_upload};

/// Empirical seconds-per-rep factor used to estimate iteration steps.
pub const REPS_TO_SECONDS_FACTOR: f64 = 3.0;

/// Assumed duration of an open-ended (lap-button) step.
pub const OPEN_STEP_DEFAULT_SECONDS: f64 = 90.0;

/// Compiles a descriptor list into the canonical step tree.
pub fn compile(steps: &[StepDescriptor]) -> Result<Vec<CanonicalStep>> {
    compile_at(steps, "steps")
}

fn compile_at(steps: &[StepDescriptor], path: &str) -> Result<Vec<CanonicalStep>> {
    if steps.is_empty() {
        return Err(WorkoutError::validation(path, "must be a non-empty list"));
    }

    let mut compiled = Vec::with_capacity(steps.len());
    for (index, node) in steps.iter().enumerate() {
        let node_path = format!("{path}[{index}]");
        let fallback_order = (index + 1) as u32;
        compiled.push(match resolve_node_kind(node, &node_path)? {
            NodeKind::RepeatGroup => {
                CanonicalStep::Repeat(build_repeat_group(node, fallback_order, &node_path)?)
            }
            NodeKind::WorkoutStep => {
                CanonicalStep::Executable(build_executable_step(node, fallback_order, &node_path)?)
            }
        });
    }
    Ok(compiled)
}

enum NodeKind {
    WorkoutStep,
    RepeatGroup,
}

/// Resolves a node's kind from its explicit `type`, a repeat-ish step type,
/// or the presence of both an iteration count and a child list.
fn resolve_node_kind(node: &StepDescriptor, path: &str) -> Result<NodeKind> {
    if let Some(raw) = node.kind.as_deref() {
        let resolved = match normalize_token(raw).as_str() {
            "workout_step" | "step" | "executablestepdto" => NodeKind::WorkoutStep,
            "repeat_group" | "repeat" | "repeatgroupdto" => NodeKind::RepeatGroup,
            _ => {
                return Err(WorkoutError::validation(
                    format!("{path}.type"),
                    "must be one of: repeat_group, workout_step",
                ))
            }
        };
        if matches!(resolved, NodeKind::WorkoutStep) && has_repeat_step_type(node) {
            return Ok(NodeKind::RepeatGroup);
        }
        return Ok(resolved);
    }

    if has_repeat_step_type(node) {
        return Ok(NodeKind::RepeatGroup);
    }

    if node.iterations.is_some() && node.steps.is_some() {
        return Ok(NodeKind::RepeatGroup);
    }
    Ok(NodeKind::WorkoutStep)
}

fn has_repeat_step_type(node: &StepDescriptor) -> bool {
    let Some(token) = node.step_type.as_ref().and_then(type_token) else {
        return false;
    };
    matches!(
        normalize_token(&token).as_str(),
        "repeat" | "repeat_group" | "repeatgroupdto"
    )
}

/// Extracts the vocabulary token from either a bare string or a canonical
/// wire object (legacy/canonical duality collapsed in one place).
fn type_token(value: &Value) -> Option<String> {
    match value {
        Value::String(token) => Some(token.clone()),
        Value::Object(map) => ["stepTypeKey", "workoutTargetTypeKey", "conditionTypeKey"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn build_executable_step(
    node: &StepDescriptor,
    fallback_order: u32,
    path: &str,
) -> Result<ExecutableStep> {
    let description = node
        .description
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| WorkoutError::validation(format!("{path}.description"), "is required"))?
        .to_string();

    let condition = resolve_end_condition(node, path)?;
    let end_condition_value = if condition == EndConditionKind::LapButton {
        None
    } else {
        Some(parse_positive_f64(
            node.duration_value.as_ref(),
            path,
            "durationValue",
        )?)
    };

    let target = match node.target_type.as_ref().and_then(type_token) {
        Some(token) => TargetKind::resolve(&token, &format!("{path}.targetType"))?,
        None => TargetKind::NoTarget,
    };

    // Absent step types default by content sniffing on the description.
    let inferred = {
        let normalized = normalize_token(&description);
        if normalized.contains("descans") || normalized.contains("rest") {
            StepKind::Rest
        } else {
            StepKind::Interval
        }
    };
    let step_kind = match node.step_type.as_ref().and_then(type_token) {
        Some(token) => StepKind::resolve(&token, &format!("{path}.stepType"))?,
        None => inferred,
    };

    Ok(ExecutableStep {
        step_order: resolve_step_order(node, fallback_order, path)?,
        description,
        step_type: step_kind.wire(),
        end_condition: condition.wire(),
        end_condition_value,
        target_type: target.wire(),
    })
}

/// Resolves the end condition from `durationType`, falling back to a
/// canonical-shape `endCondition` object. An iterations condition with
/// display order 7 reads back as the open lap-button condition.
fn resolve_end_condition(node: &StepDescriptor, path: &str) -> Result<EndConditionKind> {
    let field_path = format!("{path}.durationType");
    if let Some(token) = node.duration_type.as_deref() {
        return EndConditionKind::resolve(token, &field_path);
    }

    match node.end_condition.as_ref() {
        Some(Value::String(token)) => EndConditionKind::resolve(token, &field_path),
        Some(Value::Object(map)) => {
            let token = map
                .get("conditionTypeKey")
                .and_then(Value::as_str)
                .ok_or_else(|| WorkoutError::validation(&field_path, "is required"))?;
            let resolved = EndConditionKind::resolve(token, &field_path)?;
            if resolved == EndConditionKind::Iterations
                && map.get("displayOrder").and_then(Value::as_u64) == Some(7)
            {
                return Ok(EndConditionKind::LapButton);
            }
            Ok(resolved)
        }
        _ => Err(WorkoutError::validation(&field_path, "is required")),
    }
}

fn build_repeat_group(
    node: &StepDescriptor,
    fallback_order: u32,
    path: &str,
) -> Result<RepeatGroup> {
    let iterations = parse_positive_u32(node.iterations.as_ref(), path, "iterations")?;

    let children_raw = node
        .steps
        .as_deref()
        .filter(|children| !children.is_empty())
        .ok_or_else(|| {
            WorkoutError::validation(format!("{path}.steps"), "must be a non-empty list")
        })?;

    let workout_steps = compile_at(children_raw, &format!("{path}.steps"))?;

    Ok(RepeatGroup {
        step_order: resolve_step_order(node, fallback_order, path)?,
        step_type: StepKind::Repeat.wire(),
        number_of_iterations: iterations,
        workout_steps,
        end_condition: EndConditionRef {
            condition_type_id: EndConditionKind::Iterations.wire().condition_type_id,
            condition_type_key: "iterations",
            display_order: 7,
            displayable: false,
        },
        end_condition_value: f64::from(iterations),
        smart_repeat: node.smart_repeat.unwrap_or(false),
    })
}

fn resolve_step_order(node: &StepDescriptor, fallback_order: u32, path: &str) -> Result<u32> {
    match node.step_order.as_ref() {
        None => Ok(fallback_order),
        Some(raw) => parse_positive_u32(Some(raw), path, "stepOrder"),
    }
}

fn parse_positive_f64(raw: Option<&Value>, path: &str, field: &str) -> Result<f64> {
    let parsed = match raw {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };
    match parsed {
        Some(value) if value > 0.0 && value.is_finite() => Ok(value),
        Some(_) => Err(WorkoutError::validation(
            format!("{path}.{field}"),
            "must be > 0",
        )),
        None => Err(WorkoutError::validation(
            format!("{path}.{field}"),
            "must be numeric",
        )),
    }
}

fn parse_positive_u32(raw: Option<&Value>, path: &str, field: &str) -> Result<u32> {
    let parsed: Option<i64> = match raw {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.trunc() as i64)),
        Some(Value::String(text)) => text.trim().parse().ok(),
        None => {
            return Err(WorkoutError::validation(
                format!("{path}.{field}"),
                "is required",
            ))
        }
        _ => None,
    };
    match parsed {
        Some(value) if value >= 1 => Ok(value as u32),
        Some(_) => Err(WorkoutError::validation(
            format!("{path}.{field}"),
            "must be >= 1",
        )),
        None => Err(WorkoutError::validation(
            format!("{path}.{field}"),
            "must be an integer",
        )),
    }
}

/// Estimated elapsed seconds for one canonical step.
///
/// Time conditions contribute their value; iteration conditions contribute
/// `reps x side x REPS_TO_SECONDS_FACTOR`, doubling for per-leg exercises;
/// open lap-button steps contribute a fixed default; everything else
/// contributes nothing. Repeat groups multiply the child sum by their
/// iteration count.
pub fn estimate_step_seconds(step: &CanonicalStep) -> f64 {
    match step {
        CanonicalStep::Repeat(group) => {
            let per_iteration: f64 = group.workout_steps.iter().map(estimate_step_seconds).sum();
            per_iteration * f64::from(group.number_of_iterations.max(1))
        }
        CanonicalStep::Executable(step) => match step.end_condition.condition_type_key {
            "time" => step.end_condition_value.unwrap_or(0.0).max(0.0),
            "iterations" => {
                let Some(reps) = step.end_condition_value.filter(|value| *value > 0.0) else {
                    return OPEN_STEP_DEFAULT_SECONDS;
                };
                let description = step.description.to_lowercase();
                let side_multiplier =
                    if description.contains("/cama") || description.contains("per cama") {
                        2.0
                    } else {
                        1.0
                    };
                reps * side_multiplier * REPS_TO_SECONDS_FACTOR
            }
            _ => 0.0,
        },
    }
}

/// Total estimated seconds over a compiled step list.
pub fn estimate_total_seconds(steps: &[CanonicalStep]) -> f64 {
    steps.iter().map(estimate_step_seconds).sum()
}

#[cfg(test)]
mod tests;
