use crate::{
    error::AppError,
    models::{ListTasksQuery, NewTaskRequest, ShareTaskRequest, UpdateTaskRequest},
    store::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// List the caller's tasks as `[{id, text, status}]`.
///
/// The owning username comes in as a query parameter; an unregistered
/// username is a 400.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    query: web::Query<ListTasksQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    let tasks = state.tasks.list_by_owner(&query.username).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Create a task with status `todo`. Responds 201 with the new id.
#[post("")]
pub async fn add_task(
    state: web::Data<AppState>,
    payload: web::Json<NewTaskRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = state.tasks.create(&payload.username, &payload.text).await?;
    Ok(HttpResponse::Created().json(json!({ "id": task.id })))
}

/// Overwrite a task's text and status. A missing id is a 404 and creates
/// nothing.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    state
        .tasks
        .update(task_id.into_inner(), &payload.text, &payload.status)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "task updated" })))
}

/// Delete a task. Idempotent: a missing id still responds 204.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.tasks.delete(task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Copy a task into another user's list. The source must exist (404
/// otherwise) and the recipient must be registered (400 otherwise).
#[post("/{id}/share")]
pub async fn share_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    payload: web::Json<ShareTaskRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    state
        .sharing
        .share(task_id.into_inner(), &payload.to_username)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "task shared" })))
}
