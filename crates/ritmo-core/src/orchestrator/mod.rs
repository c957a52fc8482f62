//! High-level orchestration of the workout lifecycle.
//!
//! The [`Orchestrator`] composes the shorthand normalizer, the step
//! compiler, and the scheduled-workout index into the tool-level actions
//! (`create`, `update`, `delete`, `list_scheduled`, `list_library`,
//! `apply_week_plan`) against an injected [`RemoteClient`]. It decides
//! between in-place updates and destructive recreates and keeps the local
//! index consistent with what actually happened remotely.
//!
//! # Consistency model
//!
//! The index is a best-effort cache, never the source of truth. A failed
//! upload writes nothing; the destructive update path is not transactional
//! across its two remote calls, so a failed delete after a successful
//! replacement leaves a stray remote workout (with the index correctly
//! pointing at the new id) — accepted and documented, not hidden.

pub mod builder;
mod lifecycle;
mod listing;
mod update;
mod week;

pub use builder::OrchestratorBuilder;

use crate::index::WorkoutIndex;
use crate::remote::{RemoteClient, WeekPlanGenerator};

/// Source tag written into index entries created by this orchestrator.
pub(crate) const INDEX_SOURCE: &str = "manage_workout";

/// Main interface for managing scheduled workouts.
pub struct Orchestrator {
    pub(crate) client: Box<dyn RemoteClient>,
    pub(crate) generator: Option<Box<dyn WeekPlanGenerator>>,
    pub(crate) index: WorkoutIndex,
}

impl Orchestrator {
    pub(crate) fn new(
        client: Box<dyn RemoteClient>,
        generator: Option<Box<dyn WeekPlanGenerator>>,
        index: WorkoutIndex,
    ) -> Self {
        Self {
            client,
            generator,
            index,
        }
    }

    /// The local index backing this orchestrator.
    pub fn index(&self) -> &WorkoutIndex {
        &self.index
    }
}
