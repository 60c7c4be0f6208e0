use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use taskdeck_core::file::CreateFile;
use taskdeck_service::TaskService;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/files", post(create_file))
        .route("/api/files/{id}", get(get_file))
}

async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .get_file(id)
        .await
        .map(|f| Json(json!(f)))
        .map_err(super::to_error)
}

async fn create_file(
    State(state): State<AppState>,
    Json(input): Json<CreateFile>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    state
        .service
        .create_file(&input)
        .await
        .map(|f| (StatusCode::CREATED, Json(json!(f))))
        .map_err(super::to_error)
}
