//! Data models for step descriptors, compiled plans, and index entries.
//!
//! Input arrives as loosely typed [`StepDescriptor`] nodes; the compiler in
//! [`crate::compiler`] is the sole validator and turns them into the
//! canonical [`CanonicalStep`] tree carried by a [`WorkoutPlan`]. The
//! scheduled-workout index persists [`IndexEntry`] rows inside a single
//! [`Store`] document.

pub mod canonical;
pub mod descriptor;
pub mod entry;
pub mod plan;

pub use canonical::{CanonicalStep, ExecutableStep, RepeatGroup};
pub use descriptor::StepDescriptor;
pub use entry::{EntryStatus, IndexEntry, StatusFilter, Store, INDEX_SCHEMA_VERSION};
pub use plan::{WorkoutPlan, WorkoutSegment};
