use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::errors::AppError;
use crate::handlers::Gateway;
use crate::services::dashboard;

// GET /v1/dashboard
pub async fn get_dashboard(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, AppError> {
    let (api, mut session) = gateway.session(&credentials);
    let view = dashboard::refresh(api.as_ref(), &mut session).await?;

    Ok(HttpResponse::Ok().json(view))
}
