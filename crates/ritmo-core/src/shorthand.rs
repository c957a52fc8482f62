//! Round-shorthand normalization.
//!
//! Detects consecutive free-text "ronda N: ..." steps describing the same
//! circuit and collapses them into a single repeat-group descriptor, with
//! any "rest between rounds" step captured once as the group's trailing rest
//! child. Detection is conservative: a gap in the numbering, a body that
//! differs between rounds, or an exercise item no grammar can parse rejects
//! the whole group and the original nodes pass through unchanged.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

use crate::models::StepDescriptor;
use crate::vocab::normalize_token;

/// Fixed locale literal of the round marker.
static ROUND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*ronda\s*(\d+)\s*[:\-]\s*(.+)$").expect("round pattern compiles")
});

/// Ordered shorthand grammars for one exercise item. First match wins.
static SECONDS_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^(\d+)\s*(?:s|sec|secs|seg|segon|segons|")\s+(.+)$"#)
        .expect("seconds grammar compiles")
});
static PER_LEG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*/\s*cama\s+(.+)$").expect("per-leg grammar compiles")
});
static REPS_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)(?:\s*-\s*\d+)?\s*reps?\s+(.+)$").expect("reps grammar compiles")
});
static REPS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s*\((\d+)(?:\s*-\s*\d+)?\s*reps?\)\s*$")
        .expect("reps-suffix grammar compiles")
});
static SECONDS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s*\((\d+)\s*(?:s|sec|secs|seg|segons?)\)\s*$")
        .expect("seconds-suffix grammar compiles")
});
static BARE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("bare-count grammar compiles"));

/// Round number and body text, when a node's description matches the round
/// marker.
fn extract_round_descriptor(node: &StepDescriptor) -> Option<(u32, String)> {
    let description = node.description.as_deref()?;
    let captures = ROUND_PATTERN.captures(description.trim())?;
    let number: u32 = captures.get(1)?.as_str().parse().ok()?;
    Some((number, captures[2].trim().to_string()))
}

/// Whitespace-collapsed, case-folded body text used for round-equality.
fn normalize_round_text(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A rest-between-rounds node: rest keyword in the description plus a
/// time-based duration.
fn is_round_rest_step(node: &StepDescriptor) -> bool {
    let description = node
        .description
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    if !description.contains("descans") && !description.contains("rest") {
        return false;
    }

    let duration_token = normalize_token(node.duration_type.as_deref().unwrap_or_default());
    matches!(duration_token.as_str(), "time" | "seconds" | "sec")
}

/// Parses one comma-separated exercise item, or `None` when no grammar
/// matches.
fn parse_exercise_item(item: &str) -> Option<StepDescriptor> {
    let token = item.trim().trim_matches('.');
    if token.is_empty() {
        return None;
    }

    if let Some(captures) = SECONDS_PREFIX.captures(token) {
        let seconds: u64 = captures[1].parse().ok()?;
        return Some(StepDescriptor::leaf(
            "time",
            seconds,
            captures[2].trim(),
        ));
    }

    if let Some(captures) = PER_LEG.captures(token) {
        let reps: u64 = captures[1].parse().ok()?;
        let description = format!("{} (per cama)", captures[2].trim());
        return Some(StepDescriptor::leaf("reps", reps, description));
    }

    if let Some(captures) = REPS_PREFIX.captures(token) {
        let reps: u64 = captures[1].parse().ok()?;
        return Some(StepDescriptor::leaf("reps", reps, captures[2].trim()));
    }

    if let Some(captures) = REPS_SUFFIX.captures(token) {
        let reps: u64 = captures[2].parse().ok()?;
        return Some(StepDescriptor::leaf("reps", reps, captures[1].trim()));
    }

    if let Some(captures) = SECONDS_SUFFIX.captures(token) {
        let seconds: u64 = captures[2].parse().ok()?;
        return Some(StepDescriptor::leaf(
            "time",
            seconds,
            captures[1].trim(),
        ));
    }

    if let Some(captures) = BARE_COUNT.captures(token) {
        let reps: u64 = captures[1].parse().ok()?;
        return Some(StepDescriptor::leaf("reps", reps, captures[2].trim()));
    }

    None
}

/// Splits the round body on commas/semicolons and parses every item. A
/// single unparseable item rejects the whole group.
fn build_children_from_round_text(
    exercises_text: &str,
    rest_step: Option<&StepDescriptor>,
) -> Option<Vec<StepDescriptor>> {
    let items: Vec<&str> = exercises_text
        .split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        return None;
    }

    let mut children = Vec::with_capacity(items.len() + 1);
    for item in items {
        children.push(parse_exercise_item(item)?);
    }

    if let Some(rest) = rest_step {
        let rest_value = rest
            .duration_value
            .as_ref()
            .and_then(value_as_f64)
            .filter(|value| value.is_finite())
            .unwrap_or(60.0);

        if rest_value > 0.0 {
            children.push(StepDescriptor {
                kind: Some("workout_step".to_string()),
                duration_type: Some("time".to_string()),
                duration_value: Number::from_f64(rest_value).map(Value::Number),
                description: Some(
                    rest.description
                        .clone()
                        .filter(|text| !text.trim().is_empty())
                        .unwrap_or_else(|| "Descans entre rondes".to_string()),
                ),
                step_type: Some(Value::String("rest".to_string())),
                ..StepDescriptor::default()
            });
        }
    }

    Some(children)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Collapses consecutive matching round-shorthand steps into repeat groups.
///
/// Pure function; steps with no round pattern pass through untouched, and
/// any ambiguity leaves the original nodes in place (conservatism over
/// cleverness).
pub fn normalize_round_shorthand(raw_steps: &[StepDescriptor]) -> Vec<StepDescriptor> {
    let mut normalized = Vec::with_capacity(raw_steps.len());
    let mut index = 0;

    while index < raw_steps.len() {
        if extract_round_descriptor(&raw_steps[index]).is_none() {
            normalized.push(raw_steps[index].clone());
            index += 1;
            continue;
        }

        let group_start = index;
        let mut expected_round = 1;
        let mut round_count = 0u32;
        let mut first_round_text: Option<String> = None;
        let mut first_round_text_normalized: Option<String> = None;
        let mut rest_between_rounds: Option<&StepDescriptor> = None;
        let mut failed = false;

        while index < raw_steps.len() {
            let Some((round_number, exercises_text)) =
                extract_round_descriptor(&raw_steps[index])
            else {
                break;
            };

            if round_number != expected_round {
                failed = true;
                break;
            }

            let normalized_text = normalize_round_text(&exercises_text);
            match &first_round_text_normalized {
                None => {
                    first_round_text = Some(exercises_text);
                    first_round_text_normalized = Some(normalized_text);
                }
                Some(first) if *first != normalized_text => {
                    failed = true;
                    break;
                }
                Some(_) => {}
            }

            round_count += 1;
            expected_round += 1;
            index += 1;

            if index < raw_steps.len() && is_round_rest_step(&raw_steps[index]) {
                rest_between_rounds.get_or_insert(&raw_steps[index]);
                index += 1;
            }
        }

        let Some(body) = first_round_text.filter(|_| !failed && round_count >= 2) else {
            normalized.push(raw_steps[group_start].clone());
            index = group_start + 1;
            continue;
        };

        let Some(children) = build_children_from_round_text(&body, rest_between_rounds) else {
            normalized.push(raw_steps[group_start].clone());
            index = group_start + 1;
            continue;
        };

        normalized.push(StepDescriptor {
            kind: Some("repeat_group".to_string()),
            step_order: raw_steps[group_start].step_order.clone(),
            iterations: Some(Value::Number(round_count.into())),
            steps: Some(children),
            ..StepDescriptor::default()
        });
    }

    normalized
}
