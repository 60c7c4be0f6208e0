use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use taskdeck_core::task::{CreateTask, UpdateTask};
use taskdeck_service::{ServiceError, TaskService};

use super::AppState;

// Response messages kept verbatim for compatibility with existing clients.
const NO_TASKS_MSG: &str = "Não há tarefas a serem listadas.";
const TASK_NOT_FOUND_MSG: &str = "Tarefa não encontrada, tente novamente.";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/projects/{project_id}/tasks",
            get(list_tasks).post(create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(get_task)
                .put(update_task)
                .patch(update_task)
                .delete(delete_task),
        )
}

/// The fields a client may supply for a task. Anything else in the body,
/// `project_id` included, is dropped at deserialization.
#[derive(Debug, Deserialize)]
struct TaskBody {
    #[serde(default)]
    user_id: Option<i64>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    file_id: Option<i64>,
}

async fn list_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let tasks = state
        .service
        .list_project_tasks(project_id)
        .await
        .map_err(super::to_error)?;

    if tasks.is_empty() {
        return Err((StatusCode::NOT_FOUND, super::error_body(NO_TASKS_MSG)));
    }

    Ok(Json(json!(tasks)))
}

async fn create_task(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(body): Json<TaskBody>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    // project_id always comes from the route, never from the body
    let input = CreateTask {
        project_id,
        user_id: body.user_id,
        title: body.title,
        description: body.description,
        due_date: body.due_date,
        file_id: body.file_id,
    };
    state
        .service
        .create_task(&input)
        .await
        .map(|t| (StatusCode::CREATED, Json(json!(t))))
        .map_err(super::to_error)
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .get_task(id)
        .await
        .map(|t| Json(json!(t)))
        .map_err(lookup_error)
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .update_task(id, &input)
        .await
        .map(|t| Json(json!(t)))
        .map_err(lookup_error)
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .service
        .delete_task(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| match e {
            // delete pins 404 rather than reusing the store-reported status
            ServiceError::NotFound(_) => {
                (StatusCode::NOT_FOUND, super::error_body(TASK_NOT_FOUND_MSG))
            }
            other => super::to_error(other),
        })
}

/// Lookup misses in show/update reuse the status the store reported and
/// replace the message with the fixed client-facing one.
fn lookup_error(e: ServiceError) -> (StatusCode, Json<Value>) {
    match e {
        e @ ServiceError::NotFound(_) => {
            (super::error_status(&e), super::error_body(TASK_NOT_FOUND_MSG))
        }
        other => super::to_error(other),
    }
}
