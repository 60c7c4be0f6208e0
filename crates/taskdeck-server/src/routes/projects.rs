use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use taskdeck_core::project::{CreateProject, UpdateProject};
use taskdeck_service::TaskService;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}

async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .list_projects()
        .await
        .map(|p| Json(json!(p)))
        .map_err(super::to_error)
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .get_project(id)
        .await
        .map(|p| Json(json!(p)))
        .map_err(super::to_error)
}

async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    state
        .service
        .create_project(&input)
        .await
        .map(|p| (StatusCode::CREATED, Json(json!(p))))
        .map_err(super::to_error)
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateProject>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .update_project(id, &input)
        .await
        .map(|p| Json(json!(p)))
        .map_err(super::to_error)
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .service
        .delete_project(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(super::to_error)
}
