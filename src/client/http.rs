use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::client::{ApiConnector, ApiError, HealthApi};
use crate::models::bmi::{BmiEntry, BmiUpdate};
use crate::models::plan::{MealPlanRequest, RecommendationRequest, WorkoutPlanRequest};
use crate::models::task::{NewTask, Task, TaskList, TaskStats};
use crate::models::user::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::utils::validation::path_id;

#[derive(Deserialize)]
struct AiEnvelope {
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Upstream client bound to one session token.
#[derive(Clone)]
pub struct HttpHealthApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpHealthApi {
    pub fn new(client: Client, base_url: Url, token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    /// Appends `segments` to the base path, percent-encoding each one so an
    /// id can never add path levels or start a query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let builder = self.client.request(method, self.endpoint(segments)?);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            error!("Upstream request failed: {}", e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            info!("Upstream rejected session token");
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            let body = response.json::<UpstreamError>().await.ok();
            let message = body
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            error!("Upstream returned {}: {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| {
                error!("Could not decode upstream response: {}", e);
                ApiError::Decode(e.to_string())
            })
    }

    async fn fetch_plan(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let envelope: AiEnvelope = self.fetch(builder).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl HealthApi for HttpHealthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(self.request(Method::POST, &["auth", "register"])?.json(request)).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(self.request(Method::POST, &["auth", "login"])?.json(request)).await
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.fetch(self.request(Method::GET, &["users", "profile"])?).await
    }

    async fn update_bmi(&self, update: &BmiUpdate) -> Result<(), ApiError> {
        self.send(self.request(Method::PUT, &["users", "bmi"])?.json(update)).await?;
        Ok(())
    }

    async fn bmi_history(&self, limit: usize) -> Result<Vec<BmiEntry>, ApiError> {
        self.fetch(
            self.request(Method::GET, &["users", "bmi-history"])?
                .query(&[("limit", limit)]),
        )
        .await
    }

    async fn list_tasks(&self, completed: Option<bool>) -> Result<Vec<Task>, ApiError> {
        let mut builder = self.request(Method::GET, &["tasks"])?;
        if let Some(completed) = completed {
            builder = builder.query(&[("completed", completed)]);
        }
        let list: TaskList = self.fetch(builder).await?;
        Ok(list.tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, &["tasks"])?.json(task)).await?;
        Ok(())
    }

    async fn toggle_task(&self, id: &str) -> Result<(), ApiError> {
        let id = path_id(id)?;
        self.send(self.request(Method::PATCH, &["tasks", id, "toggle"])?).await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let id = path_id(id)?;
        self.send(self.request(Method::DELETE, &["tasks", id])?).await?;
        Ok(())
    }

    async fn task_stats(&self) -> Result<TaskStats, ApiError> {
        self.fetch(self.request(Method::GET, &["tasks", "stats", "summary"])?).await
    }

    async fn recommendations(&self, request: &RecommendationRequest) -> Result<Value, ApiError> {
        self.fetch_plan(self.request(Method::POST, &["ai", "recommendations"])?.json(request)).await
    }

    async fn meal_plan(&self, request: &MealPlanRequest) -> Result<Value, ApiError> {
        self.fetch_plan(self.request(Method::POST, &["ai", "meal-plan"])?.json(request)).await
    }

    async fn workout_plan(&self, request: &WorkoutPlanRequest) -> Result<Value, ApiError> {
        self.fetch_plan(self.request(Method::POST, &["ai", "workout-plan"])?.json(request)).await
    }
}

/// Shares one connection pool across every per-request API handle.
pub struct HttpConnector {
    client: Client,
    base_url: Url,
}

impl HttpConnector {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

impl ApiConnector for HttpConnector {
    fn connect(&self, token: Option<&str>) -> Arc<dyn HealthApi> {
        Arc::new(HttpHealthApi::new(
            self.client.clone(),
            self.base_url.clone(),
            token.map(str::to_string),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpHealthApi {
        HttpHealthApi::new(Client::new(), Url::parse(base).unwrap(), None)
    }

    #[test]
    fn endpoint_joins_segments_onto_the_base_path() {
        let url = api("http://localhost:5000/api").endpoint(&["tasks", "stats", "summary"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/tasks/stats/summary");

        let url = api("http://localhost:5000/api/").endpoint(&["users", "profile"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/users/profile");
    }

    #[test]
    fn endpoint_encodes_separators_inside_a_segment() {
        let url = api("http://localhost:5000/api").endpoint(&["tasks", "a/b#c", "toggle"]).unwrap();
        assert_eq!(url.path(), "/api/tasks/a%2Fb%23c/toggle");
        assert_eq!(url.fragment(), None);
    }
}
