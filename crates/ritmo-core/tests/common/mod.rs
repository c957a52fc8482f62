use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tempfile::TempDir;

use ritmo_core::remote::{RemoteClient, WeekPlanGenerator, WeekPlanItem};
use ritmo_core::{Orchestrator, OrchestratorBuilder, Result, WorkoutError};

/// Remote client test double recording every call it receives.
///
/// Cloning shares the underlying state, so tests keep one clone and hand
/// another to the orchestrator.
#[derive(Clone)]
pub struct MockRemote {
    calls: Arc<Mutex<Vec<String>>>,
    uploads: Arc<Mutex<Vec<Value>>>,
    puts: Arc<Mutex<Vec<Value>>>,
    upload_response: Arc<Mutex<Value>>,
    detail: Arc<Mutex<Value>>,
    library: Arc<Mutex<Value>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            uploads: Arc::new(Mutex::new(Vec::new())),
            puts: Arc::new(Mutex::new(Vec::new())),
            upload_response: Arc::new(Mutex::new(json!({ "workoutId": 101 }))),
            detail: Arc::new(Mutex::new(json!({}))),
            library: Arc::new(Mutex::new(json!([]))),
        }
    }

    /// Sets the response returned by `upload_workout`.
    pub fn set_upload_response(&self, response: Value) {
        *self.upload_response.lock().unwrap() = response;
    }

    /// Sets the document returned by `get_workout_by_id`.
    pub fn set_detail(&self, detail: Value) {
        *self.detail.lock().unwrap() = detail;
    }

    /// Sets the response returned by `list_workouts`.
    pub fn set_library(&self, library: Value) {
        *self.library.lock().unwrap() = library;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Value> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<Value> {
        self.puts.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RemoteClient for MockRemote {
    fn upload_workout(&self, payload: &Value) -> Result<Value> {
        self.record("upload_workout".to_string());
        self.uploads.lock().unwrap().push(payload.clone());
        let response = self.upload_response.lock().unwrap().clone();
        if response.is_null() {
            return Err(WorkoutError::remote("upload_workout", "simulated failure"));
        }
        Ok(response)
    }

    fn get_workout_by_id(&self, workout_id: &str) -> Result<Value> {
        self.record(format!("get:{workout_id}"));
        Ok(self.detail.lock().unwrap().clone())
    }

    fn schedule_workout(&self, workout_id: &str, date: &str) -> Result<Value> {
        self.record(format!("schedule:{workout_id}:{date}"));
        Ok(json!({ "workoutScheduleId": 9000, "date": date }))
    }

    fn update_workout(&self, workout_id: &str, payload: &Value) -> Result<()> {
        self.record(format!("put:{workout_id}"));
        self.puts.lock().unwrap().push(payload.clone());
        Ok(())
    }

    fn delete_workout(&self, workout_id: &str) -> Result<()> {
        self.record(format!("delete:{workout_id}"));
        Ok(())
    }

    fn list_workouts(&self, start: u32, limit: u32) -> Result<Value> {
        self.record(format!("list:{start}:{limit}"));
        Ok(self.library.lock().unwrap().clone())
    }
}

/// Week plan generator test double returning canned items.
pub struct MockGenerator {
    pub items: Vec<WeekPlanItem>,
}

impl WeekPlanGenerator for MockGenerator {
    fn generate(&self, _reference_date: jiff::civil::Date, _dry_run: bool) -> Result<Vec<WeekPlanItem>> {
        Ok(self.items.clone())
    }
}

/// Helper function to create a test orchestrator backed by a temporary
/// index file.
pub fn create_test_orchestrator() -> (TempDir, Orchestrator, MockRemote) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let remote = MockRemote::new();
    let orchestrator = OrchestratorBuilder::new()
        .with_client(Box::new(remote.clone()))
        .with_index_path(Some(temp_dir.path().join("index.json")))
        .build()
        .expect("Failed to build orchestrator");
    (temp_dir, orchestrator, remote)
}

/// Same as [`create_test_orchestrator`] with a week plan generator wired in.
pub fn create_test_orchestrator_with_generator(
    items: Vec<WeekPlanItem>,
) -> (TempDir, Orchestrator, MockRemote) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let remote = MockRemote::new();
    let orchestrator = OrchestratorBuilder::new()
        .with_client(Box::new(remote.clone()))
        .with_week_plan_generator(Box::new(MockGenerator { items }))
        .with_index_path(Some(temp_dir.path().join("index.json")))
        .build()
        .expect("Failed to build orchestrator");
    (temp_dir, orchestrator, remote)
}
