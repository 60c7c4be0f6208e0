//! Tests for the supporting resources (projects, users, files, health).

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use taskdeck_server::test_helpers::test_router;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_check() {
    let app = test_router();
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn project_crud() {
    let app = test_router();

    let (status, project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({ "title": "Website", "description": "Redesign" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = project["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Website");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/projects/{id}"),
        Some(json!({ "title": "Relaunch" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Relaunch");
    assert_eq!(updated["description"], "Redesign");

    let (status, _) = send(&app, "DELETE", &format!("/api/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, all) = send(&app, "GET", "/api/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn project_requires_a_title() {
    let app = test_router();
    let (status, body) = send(&app, "POST", "/api/projects", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn users_create_and_list() {
    let app = test_router();

    let (status, user) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "Ana", "email": "ana@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = user["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "ana@example.com");

    let (status, all) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/api/users/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn files_create_and_attach_to_task() {
    let app = test_router();

    let (status, file) = send(
        &app,
        "POST",
        "/api/files",
        Some(json!({ "filename": "mockup.png", "path": "uploads/mockup.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let file_id = file["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/files/{file_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["filename"], "mockup.png");

    let (status, project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({ "title": "Board" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = project["id"].as_i64().unwrap();

    let (status, task) = send(
        &app,
        "POST",
        &format!("/api/projects/{project_id}/tasks"),
        Some(json!({ "title": "With attachment", "file_id": file_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["file_id"].as_i64().unwrap(), file_id);
}
