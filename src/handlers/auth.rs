use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::errors::AppError;
use crate::handlers::Gateway;
use crate::models::user::{LoginRequest, RegisterForm, User};
use crate::services::session::Session;

#[derive(Serialize)]
pub struct AuthResponse<'a> {
    token: &'a str,
    user: &'a User,
}

// POST /v1/login
pub async fn login(
    gateway: web::Data<Gateway>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let api = gateway.anonymous();
    let mut session = Session::anonymous();
    session.login(api.as_ref(), req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(auth_response(&session)?))
}

// POST /v1/register
pub async fn register(
    gateway: web::Data<Gateway>,
    req: web::Json<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let api = gateway.anonymous();
    let mut session = Session::anonymous();
    session.register(api.as_ref(), req.into_inner()).await?;

    Ok(HttpResponse::Created().json(auth_response(&session)?))
}

fn auth_response(session: &Session) -> Result<AuthResponse<'_>, AppError> {
    match (session.token(), session.user()) {
        (Some(token), Some(user)) => Ok(AuthResponse { token, user }),
        _ => Err(AppError::BadGateway("Upstream returned no session".to_string())),
    }
}
