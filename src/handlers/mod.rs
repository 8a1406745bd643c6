pub mod ai;
pub mod auth;
pub mod bmi;
pub mod dashboard;
pub mod tasks;

use std::sync::Arc;

use actix_web::web;
use actix_web_httpauth::extractors::bearer::BearerAuth;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::client::{ApiConnector, HealthApi};
use crate::services::session::Session;

/// Shared handler state: builds upstream clients for each caller's token.
pub struct Gateway {
    connector: Arc<dyn ApiConnector>,
}

impl Gateway {
    pub fn new(connector: Arc<dyn ApiConnector>) -> Self {
        Gateway { connector }
    }

    pub(crate) fn anonymous(&self) -> Arc<dyn HealthApi> {
        self.connector.connect(None)
    }

    pub(crate) fn session(&self, credentials: &BearerAuth) -> (Arc<dyn HealthApi>, Session) {
        let token = credentials.token();
        (self.connector.connect(Some(token)), Session::with_token(token))
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Authentication middleware
    let auth = HttpAuthentication::bearer(crate::utils::jwt::validator);

    cfg.service(
        web::resource("/v1/login")
            .route(web::post().to(auth::login)),
    )
    .service(
        web::resource("/v1/register")
            .route(web::post().to(auth::register)),
    )
    .service(
        web::resource("/v1/dashboard")
            .wrap(auth.clone())
            .route(web::get().to(dashboard::get_dashboard)),
    )
    .service(
        web::resource("/v1/tasks")
            .wrap(auth.clone())
            .route(web::get().to(tasks::get_tasks))
            .route(web::post().to(tasks::create_task)),
    )
    .service(
        web::resource("/v1/tasks/{taskId}/toggle")
            .wrap(auth.clone())
            .route(web::patch().to(tasks::toggle_task)),
    )
    .service(
        web::resource("/v1/tasks/{taskId}")
            .wrap(auth.clone())
            .route(web::delete().to(tasks::delete_task)),
    )
    .service(
        web::resource("/v1/bmi")
            .wrap(auth.clone())
            .route(web::post().to(bmi::submit_bmi)),
    )
    .service(
        web::resource("/v1/ai/recommendations")
            .wrap(auth.clone())
            .route(web::post().to(ai::recommendations)),
    )
    .service(
        web::resource("/v1/ai/meal-plan")
            .wrap(auth.clone())
            .route(web::post().to(ai::meal_plan)),
    )
    .service(
        web::resource("/v1/ai/workout-plan")
            .wrap(auth.clone())
            .route(web::post().to(ai::workout_plan)),
    )
    .service(
        web::resource("/v1/ai/status")
            .wrap(auth)
            .route(web::get().to(ai::status)),
    );
}
