#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use healthhub_gateway::client::{ApiConnector, ApiError, HealthApi};
use healthhub_gateway::models::bmi::{BmiEntry, BmiUpdate};
use healthhub_gateway::models::plan::{MealPlanRequest, RecommendationRequest, WorkoutPlanRequest};
use healthhub_gateway::models::task::{NewTask, Task, TaskStats};
use healthhub_gateway::models::user::{AuthResponse, LoginRequest, RegisterRequest, User};

#[derive(Default)]
struct State {
    calls: Vec<String>,
    tasks: Vec<Task>,
    next_id: u32,
    history: Vec<BmiEntry>,
    profile: User,
    failing: HashMap<&'static str, (u16, String)>,
    expired: bool,
    ai_payload: Value,
}

/// In-memory upstream. Records every call as `"<operation> <detail>"`.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<State>>,
}

impl FakeApi {
    pub fn new() -> Self {
        let fake = FakeApi::default();
        fake.state.lock().unwrap().profile = User {
            id: Some("u1".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            height: Some(170.0),
            weight: Some(70.0),
            current_bmi: Some(24.2),
            ..User::default()
        };
        fake
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn called(&self, operation: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(operation))
    }

    /// Makes `operation` fail with an upstream 500.
    pub fn fail(&self, operation: &'static str) {
        self.fail_with(operation, 500, &format!("{} unavailable", operation));
    }

    pub fn fail_with(&self, operation: &'static str, status: u16, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(operation, (status, message.to_string()));
    }

    /// Every following call answers as if the upstream returned 401.
    pub fn expire(&self) {
        self.state.lock().unwrap().expired = true;
    }

    pub fn set_ai_payload(&self, payload: Value) {
        self.state.lock().unwrap().ai_payload = payload;
    }

    pub fn seed_history(&self, count: usize) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut state = self.state.lock().unwrap();
        // newest first
        state.history = (0..count)
            .rev()
            .map(|i| BmiEntry {
                date: start + Duration::days(i as i64),
                bmi: 20.0 + i as f64 / 10.0,
                weight: 60.0 + i as f64,
                height: 170.0,
            })
            .collect();
    }

    pub fn task_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().tasks.iter().map(|t| t.id.clone()).collect()
    }

    fn record(&self, operation: &'static str, detail: String) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("{} {}", operation, detail).trim_end().to_string());
        if state.expired {
            return Err(ApiError::SessionExpired);
        }
        if let Some((status, message)) = state.failing.get(operation) {
            return Err(ApiError::Status {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HealthApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.record("register", request.email.clone())?;
        Ok(AuthResponse {
            token: "fresh-token".to_string(),
            user: User {
                name: request.name.clone(),
                email: request.email.clone(),
                goals: request.goals.clone(),
                ..User::default()
            },
        })
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record("login", request.email.clone())?;
        let user = self.state.lock().unwrap().profile.clone();
        Ok(AuthResponse {
            token: "fresh-token".to_string(),
            user,
        })
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.record("profile", String::new())?;
        Ok(self.state.lock().unwrap().profile.clone())
    }

    async fn update_bmi(&self, update: &BmiUpdate) -> Result<(), ApiError> {
        self.record("update_bmi", format!("{} {}", update.height, update.weight))?;
        Ok(())
    }

    async fn bmi_history(&self, limit: usize) -> Result<Vec<BmiEntry>, ApiError> {
        self.record("bmi_history", limit.to_string())?;
        // ignores the bound, like an upstream that predates it
        Ok(self.state.lock().unwrap().history.clone())
    }

    async fn list_tasks(&self, completed: Option<bool>) -> Result<Vec<Task>, ApiError> {
        self.record("list_tasks", format!("{:?}", completed))?;
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|task| completed.map_or(true, |c| task.completed == c))
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<(), ApiError> {
        self.record("create_task", task.title.clone())?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("t{}", state.next_id);
        state.tasks.push(Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category,
            priority: task.priority,
            completed: false,
            due_date: None,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn toggle_task(&self, id: &str) -> Result<(), ApiError> {
        self.record("toggle_task", id.to_string())?;
        let mut state = self.state.lock().unwrap();
        match state.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                message: "Task not found".to_string(),
            }),
        }
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_task", id.to_string())?;
        self.state.lock().unwrap().tasks.retain(|task| task.id != id);
        Ok(())
    }

    async fn task_stats(&self) -> Result<TaskStats, ApiError> {
        self.record("task_stats", String::new())?;
        Ok(TaskStats::summarize(&self.state.lock().unwrap().tasks))
    }

    async fn recommendations(&self, request: &RecommendationRequest) -> Result<Value, ApiError> {
        self.record("recommendations", request.preferences.clone())?;
        Ok(self.state.lock().unwrap().ai_payload.clone())
    }

    async fn meal_plan(&self, request: &MealPlanRequest) -> Result<Value, ApiError> {
        self.record("meal_plan", request.duration.to_string())?;
        Ok(self.state.lock().unwrap().ai_payload.clone())
    }

    async fn workout_plan(&self, request: &WorkoutPlanRequest) -> Result<Value, ApiError> {
        self.record("workout_plan", request.equipment.join(","))?;
        Ok(self.state.lock().unwrap().ai_payload.clone())
    }
}

/// Hands every caller the same fake, remembering which tokens were used.
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub api: FakeApi,
    tokens: Arc<Mutex<Vec<Option<String>>>>,
}

impl FakeConnector {
    pub fn new(api: FakeApi) -> Self {
        FakeConnector {
            api,
            tokens: Arc::default(),
        }
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

impl ApiConnector for FakeConnector {
    fn connect(&self, token: Option<&str>) -> Arc<dyn HealthApi> {
        self.tokens.lock().unwrap().push(token.map(str::to_string));
        Arc::new(self.api.clone())
    }
}
