//! The `apply_week_plan` action.

use jiff::civil::Date;
use jiff::Zoned;
use log::debug;

use super::update::{sport_key_of, string_field};
use super::{Orchestrator, INDEX_SOURCE};
use crate::error::{Result, WorkoutError};
use crate::index::EntryDraft;
use crate::params::ApplyWeekPlan;
use crate::results::{WeekPlanOutcome, STATUS_SUCCESS};

impl Orchestrator {
    /// Runs the weekly-plan generator and indexes what it scheduled.
    ///
    /// Dry runs return the generator's items untouched. Otherwise every
    /// successful item carrying a workout id is re-fetched from the remote
    /// before indexing: the remote is authoritative for the sport label.
    pub fn apply_week_plan(&self, params: &ApplyWeekPlan) -> Result<WeekPlanOutcome> {
        let generator = self.generator.as_deref().ok_or_else(|| {
            WorkoutError::Configuration {
                message: "a week plan generator is required for apply_week_plan".to_string(),
            }
        })?;

        let reference_date = match params.from_date.as_deref() {
            Some(raw) => raw.parse::<Date>().map_err(|_| {
                WorkoutError::validation("from_date", "must use YYYY-MM-DD format")
            })?,
            None => Zoned::now().date(),
        };
        debug!(
            "apply week plan from {reference_date} (dry_run={})",
            params.dry_run
        );

        let items = generator.generate(reference_date, params.dry_run)?;

        if !params.dry_run {
            for item in &items {
                if !item.succeeded() {
                    continue;
                }
                let Some(workout_id) = item.workout_id.as_deref().map(str::trim) else {
                    continue;
                };
                if workout_id.is_empty() {
                    continue;
                }

                let detail = self.client.get_workout_by_id(workout_id)?;
                let workout_name = string_field(&detail, "workoutName")
                    .or(item.workout_name.as_deref())
                    .unwrap_or("Workout");
                self.index.upsert(EntryDraft {
                    workout_id: workout_id.to_string(),
                    workout_name: workout_name.to_string(),
                    description: string_field(&detail, "description")
                        .unwrap_or_default()
                        .to_string(),
                    date: item.scheduled_date.clone(),
                    sport_type: sport_key_of(&detail).unwrap_or("unknown").to_string(),
                    status: None,
                    last_action: "apply_week_plan".to_string(),
                    source: INDEX_SOURCE.to_string(),
                })?;
            }
        }

        Ok(WeekPlanOutcome {
            status: STATUS_SUCCESS,
            action: "apply_week_plan",
            dry_run: params.dry_run,
            count: items.len(),
            items,
            message: "Pla setmanal processat correctament.".to_string(),
        })
    }
}
