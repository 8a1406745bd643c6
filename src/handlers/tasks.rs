use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::Gateway;
use crate::models::task::{NewTask, Task, TaskFilter, TaskStats};
use crate::services::task_store::{Deletion, TaskStore};

#[derive(Deserialize)]
pub struct GetTasksQuery {
    #[serde(default)]
    filter: TaskFilter,
}

#[derive(Deserialize)]
pub struct DeleteTaskQuery {
    #[serde(default)]
    confirm: bool,
    #[serde(default)]
    filter: TaskFilter,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse<'a> {
    filter: TaskFilter,
    tasks: &'a [Task],
    summary: TaskStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskResponse<'a> {
    deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tasks: Option<&'a [Task]>,
}

fn list_response(store: &TaskStore) -> HttpResponse {
    HttpResponse::Ok().json(TaskListResponse {
        filter: store.filter(),
        tasks: store.tasks(),
        summary: store.summarize(),
    })
}

// GET /v1/tasks?filter=all|pending|completed
pub async fn get_tasks(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    query: web::Query<GetTasksQuery>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let mut store = TaskStore::new(api);
    store.set_filter(query.filter).await?;

    Ok(list_response(&store))
}

// POST /v1/tasks?filter=
pub async fn create_task(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    query: web::Query<GetTasksQuery>,
    payload: web::Json<NewTask>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let mut store = TaskStore::with_filter(api, query.filter);
    store.create(payload.into_inner()).await?;

    Ok(list_response(&store))
}

// PATCH /v1/tasks/{taskId}/toggle?filter=
pub async fn toggle_task(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    task_id: web::Path<String>,
    query: web::Query<GetTasksQuery>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let mut store = TaskStore::with_filter(api, query.filter);
    store.toggle(&task_id).await?;

    Ok(list_response(&store))
}

// DELETE /v1/tasks/{taskId}?confirm=true&filter=
// Without confirm=true nothing is sent upstream.
pub async fn delete_task(
    credentials: BearerAuth,
    gateway: web::Data<Gateway>,
    task_id: web::Path<String>,
    query: web::Query<DeleteTaskQuery>,
) -> Result<HttpResponse, AppError> {
    let (api, _) = gateway.session(&credentials);
    let mut store = TaskStore::with_filter(api, query.filter);
    let response = match store.delete(&task_id, &query.confirm).await? {
        Deletion::Deleted => DeleteTaskResponse {
            deleted: true,
            tasks: Some(store.tasks()),
        },
        Deletion::Cancelled => DeleteTaskResponse {
            deleted: false,
            tasks: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
