use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::errors::AppError;
use crate::handlers::Gateway;
use crate::models::plan::{MealPlanRequest, NormalizedPlan, RecommendationRequest, WorkoutPlanRequest};
use crate::services::advisor;

// POST /v1/ai/recommendations
pub async fn recommendations(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    req: web::Json<RecommendationRequest>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let plan = advisor::recommendations(api.as_ref(), &req).await?;

    Ok(HttpResponse::Ok().json(NormalizedPlan::Recommendations(plan)))
}

// POST /v1/ai/meal-plan
pub async fn meal_plan(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    req: web::Json<MealPlanRequest>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let plan = advisor::meal_plan(api.as_ref(), &req).await?;

    Ok(HttpResponse::Ok().json(NormalizedPlan::MealPlan(plan)))
}

// POST /v1/ai/workout-plan
pub async fn workout_plan(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    req: web::Json<WorkoutPlanRequest>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let plan = advisor::workout_plan(api.as_ref(), &req).await?;

    Ok(HttpResponse::Ok().json(NormalizedPlan::WorkoutPlan(plan)))
}

// GET /v1/ai/status
pub async fn status(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let status = advisor::ai_status(api.as_ref()).await?;

    Ok(HttpResponse::Ok().json(status))
}
