//! Builder for creating and configuring Orchestrator instances.

use std::path::{Path, PathBuf};

use super::Orchestrator;
use crate::error::{Result, WorkoutError};
use crate::index::WorkoutIndex;
use crate::remote::{RemoteClient, WeekPlanGenerator};

/// Builder for creating and configuring Orchestrator instances.
pub struct OrchestratorBuilder {
    client: Option<Box<dyn RemoteClient>>,
    generator: Option<Box<dyn WeekPlanGenerator>>,
    index_path: Option<PathBuf>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            client: None,
            generator: None,
            index_path: None,
        }
    }

    /// Injects the remote fitness client (required).
    pub fn with_client(mut self, client: Box<dyn RemoteClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Injects the weekly-plan generator, enabling `apply_week_plan`.
    pub fn with_week_plan_generator(mut self, generator: Box<dyn WeekPlanGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Sets a custom index document path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/ritmo/scheduled_workouts.json` or
    /// `~/.local/share/ritmo/scheduled_workouts.json`
    pub fn with_index_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.index_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured orchestrator instance.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Configuration` if no remote client was
    /// injected, and `WorkoutError::XdgDirectory` if the default index
    /// location cannot be resolved.
    pub fn build(self) -> Result<Orchestrator> {
        let client = self.client.ok_or_else(|| WorkoutError::Configuration {
            message: "a remote client is required".to_string(),
        })?;

        let index_path = match self.index_path {
            Some(path) => path,
            None => Self::default_index_path()?,
        };

        if let Some(parent) = index_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|error| WorkoutError::file_system(parent, error))?;
            }
        }

        Ok(Orchestrator::new(
            client,
            self.generator,
            WorkoutIndex::new(index_path),
        ))
    }

    /// Returns the default index path following XDG Base Directory
    /// specification.
    fn default_index_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("ritmo")
            .place_data_file("scheduled_workouts.json")
            .map_err(|e| WorkoutError::XdgDirectory(e.to_string()))
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
