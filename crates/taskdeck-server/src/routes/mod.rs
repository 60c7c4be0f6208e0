pub mod files;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::{json, Value};
use taskdeck_service::{LocalService, ServiceError};
use tower_http::cors::CorsLayer;

pub struct InnerAppState {
    pub service: LocalService,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(service: LocalService) -> Router {
    let state: AppState = Arc::new(InnerAppState { service });

    Router::new()
        .merge(health::routes())
        .merge(projects::routes())
        .merge(users::routes())
        .merge(files::routes())
        .merge(tasks::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Every error response uses the same envelope shape.
pub(crate) fn error_body(message: &str) -> Json<Value> {
    Json(json!({ "error": { "message": message } }))
}

/// The HTTP status the store's error reports.
pub(crate) fn error_status(e: &ServiceError) -> StatusCode {
    match e {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn to_error(e: ServiceError) -> (StatusCode, Json<Value>) {
    (error_status(&e), error_body(&e.to_string()))
}
