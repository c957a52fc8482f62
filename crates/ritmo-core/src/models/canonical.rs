//! Canonical step tree produced by the compiler.

use serde::Serialize;

use crate::vocab::{EndConditionRef, StepTypeRef, TargetTypeRef};

/// A validated, fully typed step node.
///
/// The wire tag mirrors the remote service's DTO names so that a serialized
/// tree can be re-fed to the compiler or uploaded as-is.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum CanonicalStep {
    #[serde(rename = "ExecutableStepDTO")]
    Executable(ExecutableStep),
    #[serde(rename = "RepeatGroupDTO")]
    Repeat(RepeatGroup),
}

/// Leaf step with a resolved step type, end condition, and target.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableStep {
    pub step_order: u32,
    pub description: String,
    pub step_type: StepTypeRef,
    pub end_condition: EndConditionRef,
    /// `None` only for the open-ended lap-button end condition
    pub end_condition_value: Option<f64>,
    pub target_type: TargetTypeRef,
}

/// Ordered child list executed `number_of_iterations` times.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepeatGroup {
    pub step_order: u32,
    pub step_type: StepTypeRef,
    pub number_of_iterations: u32,
    /// Never empty; enforced by the compiler
    pub workout_steps: Vec<CanonicalStep>,
    pub end_condition: EndConditionRef,
    pub end_condition_value: f64,
    pub smart_repeat: bool,
}

impl CanonicalStep {
    /// Step order of this node within its sibling list.
    pub fn step_order(&self) -> u32 {
        match self {
            CanonicalStep::Executable(step) => step.step_order,
            CanonicalStep::Repeat(group) => group.step_order,
        }
    }
}
