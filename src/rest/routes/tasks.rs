// rest/routes/tasks.rs — task CRUD routes.
//
// Request bodies use `Option` fields so an absent field reaches the
// presence check and comes back as a 400 validation error instead of an
// axum body-deserialization rejection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::tasks::{Task, TaskError};
use crate::AppContext;

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let task = ctx.tasks.create(body.title, body.description).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<Task>>, TaskError> {
    Ok(Json(ctx.tasks.list().await?))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, TaskError> {
    Ok(Json(ctx.tasks.get(&id).await?))
}

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, TaskError> {
    let task = ctx.tasks.update(&id, body.title, body.description).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, TaskError> {
    ctx.tasks.delete(&id).await?;
    Ok(Json(json!({ "message": "Task deleted" })))
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: Option<String>,
}

pub async fn set_task_status(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<Value>, TaskError> {
    let task = ctx.tasks.set_status(&id, body.status).await?;
    Ok(Json(json!({ "message": "Task status updated", "task": task })))
}
