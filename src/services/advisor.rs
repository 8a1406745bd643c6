use log::{error, info};
use serde::Serialize;

use crate::client::{ApiError, HealthApi};
use crate::models::plan::{
    AdviceSection, MealDay, MealPlanRequest, PlanView, RecommendationRequest, WorkoutDay,
    WorkoutPlanRequest,
};
use crate::services::normalizer;

const NOT_CONFIGURED_MARKER: &str = "AI service not configured";

pub async fn recommendations(
    api: &dyn HealthApi,
    request: &RecommendationRequest,
) -> Result<PlanView<AdviceSection>, ApiError> {
    let payload = api.recommendations(request).await.map_err(|e| {
        error!("Error generating recommendations: {}", e);
        e
    })?;
    Ok(normalizer::recommendations(&payload))
}

pub async fn meal_plan(
    api: &dyn HealthApi,
    request: &MealPlanRequest,
) -> Result<PlanView<MealDay>, ApiError> {
    let payload = api.meal_plan(request).await.map_err(|e| {
        error!("Error generating meal plan: {}", e);
        e
    })?;
    Ok(normalizer::meal_plan(&payload))
}

pub async fn workout_plan(
    api: &dyn HealthApi,
    request: &WorkoutPlanRequest,
) -> Result<PlanView<WorkoutDay>, ApiError> {
    let payload = api.workout_plan(request).await.map_err(|e| {
        error!("Error generating workout plan: {}", e);
        e
    })?;
    Ok(normalizer::workout_plan(&payload))
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiStatus {
    pub configured: bool,
}

/// Probes the recommendations endpoint. Only an upstream error naming the
/// missing AI configuration counts as "not configured".
pub async fn ai_status(api: &dyn HealthApi) -> Result<AiStatus, ApiError> {
    match api.recommendations(&RecommendationRequest::default()).await {
        Ok(_) => Ok(AiStatus { configured: true }),
        Err(ApiError::SessionExpired) => Err(ApiError::SessionExpired),
        Err(ApiError::Status { message, .. }) if message.contains(NOT_CONFIGURED_MARKER) => {
            info!("AI service is not configured upstream");
            Ok(AiStatus { configured: false })
        }
        Err(_) => Ok(AiStatus { configured: true }),
    }
}
