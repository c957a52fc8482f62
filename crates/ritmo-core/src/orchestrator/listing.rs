//! The `list_scheduled` and `list_library` actions.

use log::debug;
use serde_json::Value;

use super::update::sport_key_of;
use super::Orchestrator;
use crate::compiler::payload::bounded;
use crate::error::Result;
use crate::params::{ListLibrary, ListScheduled};
use crate::results::{ListLibraryOutcome, ListScheduledOutcome, ScheduledItem, STATUS_SUCCESS};
use crate::vocab::SportKind;

impl Orchestrator {
    /// Lists scheduled workouts from the local index, never the remote.
    pub fn list_scheduled(&self, params: &ListScheduled) -> Result<ListScheduledOutcome> {
        debug!("list scheduled workouts (status={})", params.status);
        let status = params.status.parse()?;
        let limit = bounded(params.limit as i64, 1, 500) as usize;
        let rows = self.index.list(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            status,
            limit,
        )?;

        let items: Vec<ScheduledItem> = rows
            .into_iter()
            .map(|entry| ScheduledItem {
                workout_id: entry.workout_id,
                workout_name: entry.workout_name,
                description: entry.description,
                date: entry.date,
                sport_type: entry.sport_type,
                status: entry.status.as_str(),
                updated_at: entry.updated_at,
            })
            .collect();

        Ok(ListScheduledOutcome {
            status: STATUS_SUCCESS,
            action: "list_scheduled",
            source: "local_index",
            count: items.len(),
            items,
            message: "Sessions retornades des de l'index local.".to_string(),
        })
    }

    /// Pages through the remote workout library, tolerating both a bare
    /// array response and one with an embedded `workouts` array.
    pub fn list_library(&self, params: &ListLibrary) -> Result<ListLibraryOutcome> {
        let limit = bounded(params.limit as i64, 1, 200) as u32;
        debug!("list library workouts (start={}, limit={limit})", params.start);
        let response = self.client.list_workouts(params.start, limit)?;

        let mut workouts: Vec<Value> = match response {
            Value::Array(items) => items.into_iter().filter(|item| item.is_object()).collect(),
            Value::Object(mut map) => match map.remove("workouts") {
                Some(Value::Array(items)) => {
                    items.into_iter().filter(|item| item.is_object()).collect()
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        if let Some(sport) = params.sport_type.as_deref() {
            let expected_key = sport.parse::<SportKind>()?.key();
            workouts.retain(|workout| sport_key_of(workout) == Some(expected_key));
        }

        Ok(ListLibraryOutcome {
            status: STATUS_SUCCESS,
            action: "list_library",
            count: workouts.len(),
            items: workouts,
            message: "Workouts de la biblioteca remota retornats correctament.".to_string(),
        })
    }
}
