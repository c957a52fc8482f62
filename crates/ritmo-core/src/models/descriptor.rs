//! Loosely typed step descriptors accepted as caller input.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unvalidated description of one workout step or repeat group.
///
/// Descriptors deliberately accept the legacy and the canonical shape of the
/// same concept through serde aliases (`numberOfIterations` for
/// `iterations`, `workoutSteps` for `steps`, `endConditionValue` for
/// `durationValue`), so a previously compiled tree round-trips through the
/// compiler unchanged. Numeric fields stay [`Value`] because callers send
/// both numbers and numeric strings; the compiler owns all validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    /// Node kind token: `workout_step`, `repeat_group`, or a legacy alias
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// 1-based order among siblings; auto-assigned when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_order: Option<Value>,

    /// Free-text description of the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// End-condition token (`time`, `reps`, `lap_button`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_type: Option<String>,

    /// End-condition value; number or numeric string
    #[serde(
        default,
        alias = "endConditionValue",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_value: Option<Value>,

    /// Canonical-shape end condition object, read when `durationType` is
    /// absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_condition: Option<Value>,

    /// Step-type token or canonical wire object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<Value>,

    /// Target-type token or canonical wire object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<Value>,

    /// Repeat-group iteration count
    #[serde(
        default,
        alias = "numberOfIterations",
        alias = "repeatIterations",
        skip_serializing_if = "Option::is_none"
    )]
    pub iterations: Option<Value>,

    /// Repeat-group children
    #[serde(
        default,
        alias = "workoutSteps",
        skip_serializing_if = "Option::is_none"
    )]
    pub steps: Option<Vec<StepDescriptor>>,

    /// Smart-repeat flag forwarded to the wire representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_repeat: Option<bool>,
}

impl StepDescriptor {
    /// Leaf step with a duration, as produced by the shorthand normalizer.
    pub(crate) fn leaf(
        duration_type: &str,
        duration_value: impl Into<serde_json::Number>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some("workout_step".to_string()),
            duration_type: Some(duration_type.to_string()),
            duration_value: Some(Value::Number(duration_value.into())),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}
