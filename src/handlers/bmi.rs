use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::errors::AppError;
use crate::handlers::Gateway;
use crate::models::bmi::BmiInput;
use crate::services::bmi;

// POST /v1/bmi
pub async fn submit_bmi(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    input: web::Json<BmiInput>,
) -> Result<HttpResponse, AppError> {
    let (api, mut session) = gateway.session(&credentials);
    let reading = bmi::submit(api.as_ref(), &mut session, &input).await?;

    Ok(HttpResponse::Ok().json(reading))
}
