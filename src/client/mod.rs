//! Seam to the upstream health REST API.
//!
//! Every service in this crate talks to the upstream through [`HealthApi`].
//! The production implementation is [`http::HttpHealthApi`]; tests supply an
//! in-memory one.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::bmi::{BmiEntry, BmiUpdate};
use crate::models::plan::{MealPlanRequest, RecommendationRequest, WorkoutPlanRequest};
use crate::models::task::{NewTask, Task, TaskStats};
use crate::models::user::{AuthResponse, LoginRequest, RegisterRequest, User};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Rejected locally; nothing was sent upstream.
    #[error("{0}")]
    Validation(String),
    /// The upstream answered 401 or the token is past its expiry.
    #[error("session expired")]
    SessionExpired,
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

#[async_trait]
pub trait HealthApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn profile(&self) -> Result<User, ApiError>;

    async fn update_bmi(&self, update: &BmiUpdate) -> Result<(), ApiError>;

    /// Newest first, at most `limit` entries if the upstream honours the bound.
    async fn bmi_history(&self, limit: usize) -> Result<Vec<BmiEntry>, ApiError>;

    async fn list_tasks(&self, completed: Option<bool>) -> Result<Vec<Task>, ApiError>;

    async fn create_task(&self, task: &NewTask) -> Result<(), ApiError>;

    async fn toggle_task(&self, id: &str) -> Result<(), ApiError>;

    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;

    async fn task_stats(&self) -> Result<TaskStats, ApiError>;

    /// Each AI call returns the `data` member of the response, unparsed.
    async fn recommendations(&self, request: &RecommendationRequest) -> Result<Value, ApiError>;

    async fn meal_plan(&self, request: &MealPlanRequest) -> Result<Value, ApiError>;

    async fn workout_plan(&self, request: &WorkoutPlanRequest) -> Result<Value, ApiError>;
}

/// Hands out API handles bound to a caller's bearer token.
pub trait ApiConnector: Send + Sync {
    fn connect(&self, token: Option<&str>) -> Arc<dyn HealthApi>;
}
