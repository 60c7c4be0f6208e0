use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use taskdeck_core::user::CreateUser;
use taskdeck_service::TaskService;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .list_users()
        .await
        .map(|u| Json(json!(u)))
        .map_err(super::to_error)
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .get_user(id)
        .await
        .map(|u| Json(json!(u)))
        .map_err(super::to_error)
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    state
        .service
        .create_user(&input)
        .await
        .map(|u| (StatusCode::CREATED, Json(json!(u))))
        .map_err(super::to_error)
}
