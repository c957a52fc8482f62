//! Closed vocabularies for step types, end conditions, targets, and sports.
//!
//! Each vocabulary is a fixed enumeration paired with the wire reference
//! object the remote service expects (numeric id, key, display order).
//! Free-form tokens from caller input are resolved through an explicit
//! normalization function; an unknown token is a validation error listing
//! the allowed set, never a guess.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, WorkoutError};

/// Normalizes a free-form token for vocabulary lookup.
///
/// Lowercases and folds `-`, ` `, and `.` to `_`, so both shorthand input
/// ("heart-rate") and canonical wire keys ("heart.rate", "no.target")
/// resolve to the same variant.
pub fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', ' ', '.'], "_")
}

/// Wire reference for a step type.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepTypeRef {
    pub step_type_id: u32,
    pub step_type_key: &'static str,
    pub display_order: u32,
}

/// Wire reference for an end condition.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndConditionRef {
    pub condition_type_id: u32,
    pub condition_type_key: &'static str,
    pub display_order: u32,
    pub displayable: bool,
}

/// Wire reference for a target type.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetTypeRef {
    pub workout_target_type_id: u32,
    pub workout_target_type_key: &'static str,
    pub display_order: u32,
}

/// Wire reference for a sport type.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SportTypeRef {
    pub sport_type_id: u32,
    pub sport_type_key: &'static str,
    pub display_order: u32,
}

/// Type of an executable step within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Warmup,
    Cooldown,
    Interval,
    Recovery,
    Rest,
    Repeat,
}

impl StepKind {
    /// Wire reference carried by compiled steps.
    pub fn wire(self) -> StepTypeRef {
        let (id, key, order) = match self {
            StepKind::Warmup => (1, "warmup", 1),
            StepKind::Cooldown => (2, "cooldown", 2),
            StepKind::Interval => (3, "interval", 3),
            StepKind::Recovery => (4, "recovery", 4),
            StepKind::Rest => (5, "rest", 5),
            StepKind::Repeat => (6, "repeat", 6),
        };
        StepTypeRef {
            step_type_id: id,
            step_type_key: key,
            display_order: order,
        }
    }

    /// Resolves a free-form token, failing with the allowed set.
    ///
    /// The `repeat` variant is deliberately absent here: repeat groups are a
    /// node kind, not an assignable step type.
    pub fn resolve(token: &str, path: &str) -> Result<Self> {
        match normalize_token(token).as_str() {
            "warmup" | "warm_up" => Ok(StepKind::Warmup),
            "cooldown" | "cool_down" => Ok(StepKind::Cooldown),
            "interval" | "workout_step" => Ok(StepKind::Interval),
            "recovery" => Ok(StepKind::Recovery),
            "rest" => Ok(StepKind::Rest),
            _ => Err(WorkoutError::validation(
                path,
                "must be one of: cooldown, interval, recovery, rest, warmup",
            )),
        }
    }
}

/// End condition terminating an executable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndConditionKind {
    Time,
    Iterations,
    Distance,
    Calories,
    HeartRate,
    Cadence,
    Power,
    /// Open-ended, advanced by the operator pressing the lap button. Encoded
    /// on the wire as an iterations condition with display order 7 and no
    /// condition value.
    LapButton,
}

impl EndConditionKind {
    pub fn wire(self) -> EndConditionRef {
        let (id, key, order) = match self {
            EndConditionKind::Time => (2, "time", 2),
            EndConditionKind::Iterations => (7, "iterations", 2),
            EndConditionKind::Distance => (3, "distance", 2),
            EndConditionKind::Calories => (4, "calories", 2),
            EndConditionKind::HeartRate => (6, "heart.rate", 2),
            EndConditionKind::Cadence => (8, "cadence", 2),
            EndConditionKind::Power => (5, "power", 2),
            EndConditionKind::LapButton => (7, "iterations", 7),
        };
        EndConditionRef {
            condition_type_id: id,
            condition_type_key: key,
            display_order: order,
            displayable: true,
        }
    }

    pub fn resolve(token: &str, path: &str) -> Result<Self> {
        match normalize_token(token).as_str() {
            "time" | "seconds" | "sec" => Ok(EndConditionKind::Time),
            "reps" | "rep" | "iterations" => Ok(EndConditionKind::Iterations),
            "distance" => Ok(EndConditionKind::Distance),
            "calories" => Ok(EndConditionKind::Calories),
            "heart_rate" => Ok(EndConditionKind::HeartRate),
            "cadence" => Ok(EndConditionKind::Cadence),
            "power" => Ok(EndConditionKind::Power),
            "lap_button" | "lap" | "lapbutton" | "button" | "button_press" | "open" => {
                Ok(EndConditionKind::LapButton)
            }
            _ => Err(WorkoutError::validation(
                path,
                "must be one of: cadence, calories, distance, heart_rate, \
                 iterations, lap_button, power, time",
            )),
        }
    }
}

/// Target type attached to an executable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    #[default]
    NoTarget,
    HeartRate,
    Cadence,
    Speed,
    Power,
    Open,
}

impl TargetKind {
    pub fn wire(self) -> TargetTypeRef {
        let (id, key, order) = match self {
            TargetKind::NoTarget => (1, "no.target", 1),
            TargetKind::HeartRate => (4, "heart.rate", 2),
            TargetKind::Cadence => (3, "cadence", 3),
            TargetKind::Speed => (5, "speed", 4),
            TargetKind::Power => (2, "power", 5),
            TargetKind::Open => (6, "open", 6),
        };
        TargetTypeRef {
            workout_target_type_id: id,
            workout_target_type_key: key,
            display_order: order,
        }
    }

    pub fn resolve(token: &str, path: &str) -> Result<Self> {
        match normalize_token(token).as_str() {
            "no_target" | "none" => Ok(TargetKind::NoTarget),
            "heart_rate" => Ok(TargetKind::HeartRate),
            "cadence" => Ok(TargetKind::Cadence),
            "speed" => Ok(TargetKind::Speed),
            "power" => Ok(TargetKind::Power),
            "open" => Ok(TargetKind::Open),
            _ => Err(WorkoutError::validation(
                path,
                "must be one of: cadence, heart_rate, no_target, open, power, speed",
            )),
        }
    }
}

/// Sport category of a whole workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SportKind {
    Running,
    #[default]
    Strength,
    Cardio,
    Hiit,
}

impl SportKind {
    pub fn wire(self) -> SportTypeRef {
        let (id, key, order) = match self {
            SportKind::Running => (1, "running", 1),
            SportKind::Strength => (20, "strength_training", 6),
            SportKind::Cardio => (6, "cardio_training", 6),
            SportKind::Hiit => (33, "hiit", 6),
        };
        SportTypeRef {
            sport_type_id: id,
            sport_type_key: key,
            display_order: order,
        }
    }

    /// The wire key alone, used for index entries and library filtering.
    pub fn key(self) -> &'static str {
        self.wire().sport_type_key
    }

    /// Resolves an optional free-form token, falling back to `default`.
    pub fn resolve_or(token: Option<&str>, default: SportKind) -> Result<Self> {
        match token {
            None => Ok(default),
            Some(raw) => raw.parse(),
        }
    }
}

impl FromStr for SportKind {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "running" | "run" => Ok(SportKind::Running),
            "strength" | "strength_training" => Ok(SportKind::Strength),
            "cardio" | "cardio_training" => Ok(SportKind::Cardio),
            "hiit" => Ok(SportKind::Hiit),
            _ => Err(WorkoutError::validation(
                "sport_type",
                "must be one of: CARDIO, HIIT, RUNNING, STRENGTH",
            )),
        }
    }
}
