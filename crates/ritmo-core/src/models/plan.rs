//! Compiled workout plan payloads.

use serde::Serialize;

use super::CanonicalStep;
use crate::vocab::SportTypeRef;

/// Fully structured, schema-valid workout plan ready for upload.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub workout_name: String,
    pub description: String,
    /// Always > 0; falls back to the requested duration when step-based
    /// estimation yields nothing
    pub estimated_duration_in_secs: u64,
    pub sport_type: SportTypeRef,
    pub workout_segments: Vec<WorkoutSegment>,
}

/// Single segment carrying the step tree. The remote model allows several,
/// but compiled plans always produce exactly one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    pub segment_order: u32,
    pub sport_type: SportTypeRef,
    pub workout_steps: Vec<CanonicalStep>,
}

impl WorkoutPlan {
    /// Serializes the plan to the JSON document the remote client consumes.
    pub fn to_value(&self) -> serde_json::Value {
        // Serialize of a plain struct tree cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
