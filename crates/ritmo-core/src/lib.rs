//! Core library for the Ritmo workout planning application.
//!
//! This crate turns a forgiving, shorthand-friendly step description into
//! the strict document tree a remote fitness-tracking service accepts, and
//! keeps a local crash-safe index of what was scheduled:
//!
//! - **Round shorthand** ([`shorthand`]): collapses textual "ronda N: ..."
//!   step sequences into repeat groups before compilation
//! - **Step compiler** ([`compiler`]): resolves free-form tokens against
//!   closed vocabularies ([`vocab`]) into canonical executable steps and
//!   repeat groups, with duration estimation
//! - **Scheduled-workout index** ([`index`]): a single JSON document with
//!   atomic replace writes and soft deletes
//! - **Orchestrator** ([`orchestrator`]): the create / update / delete /
//!   list / apply-week-plan lifecycle against an injected remote client
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ritmo_core::{OrchestratorBuilder, params::CreateWorkout};
//! # use ritmo_core::remote::RemoteClient;
//! # fn client() -> Box<dyn RemoteClient> { unimplemented!() }
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = OrchestratorBuilder::new()
//!     .with_client(client())
//!     .build()?;
//!
//! let params = CreateWorkout {
//!     name: Some("Força A".to_string()),
//!     date: Some("2026-09-01".to_string()),
//!     description: Some("Sessió de força".to_string()),
//!     ..Default::default()
//! };
//!
//! let outcome = orchestrator.create(&params)?;
//! println!("Created workout {}", outcome.workout_id);
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod error;
pub mod index;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod remote;
pub mod results;
pub mod shorthand;
pub mod vocab;

// Re-export commonly used types
pub use error::{Result, WorkoutError};
pub use index::{EntryDraft, WorkoutIndex};
pub use models::{
    CanonicalStep, EntryStatus, IndexEntry, StatusFilter, StepDescriptor, WorkoutPlan,
};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use params::{
    ApplyWeekPlan, CreateWorkout, DeleteWorkout, ListLibrary, ListScheduled, UpdateWorkout,
};
pub use remote::{RemoteClient, WeekPlanGenerator, WeekPlanItem};
pub use results::{
    CreateOutcome, DeleteOutcome, ListLibraryOutcome, ListScheduledOutcome, ScheduledItem,
    UpdateOutcome, WeekPlanOutcome,
};
pub use shorthand::normalize_round_shorthand;
pub use vocab::SportKind;
