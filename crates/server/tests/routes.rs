use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, AppState};
use service::storage::{MemoryUserStore, UserStore};
use service::RecordService;

fn app() -> Router {
    let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    routes::build_router(AppState { users: RecordService::new(store) }, CorsLayer::very_permissive())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    let req = req.body(body.unwrap_or_else(Body::empty))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

fn json_body(v: Value) -> Option<Body> {
    Some(Body::from(v.to_string()))
}

fn asha() -> Value {
    json!({"full_name": "Asha Rao", "mob_num": "1234567890", "pan_num": "ABCDE1234F"})
}

async fn create(app: &Router, v: Value) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/users", json_body(v)).await?;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    Ok(body["user_id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn health_and_openapi_are_public() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users"].is_object());
    Ok(())
}

#[tokio::test]
async fn create_then_get_returns_same_fields() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "POST", "/users", json_body(asha())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User created successfully");
    let id = body["user_id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());

    let (status, body) = send(&app, "GET", &format!("/user?user_id={id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"user_id": &id, "full_name": "Asha Rao", "mob_num": "1234567890", "pan_num": "ABCDE1234F"})
    );
    Ok(())
}

#[tokio::test]
async fn create_validation_errors_are_400_in_field_order() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        json_body(json!({"full_name": "   ", "mob_num": "123", "pan_num": "abcde1234f"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Full name cannot be empty");

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        json_body(json!({"full_name": "Asha", "mob_num": "12345abcde", "pan_num": "abcde1234f"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid mobile number format");

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        json_body(json!({"full_name": "Asha", "mob_num": "1234567890", "pan_num": "ABCD1234FF"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid PAN number format");

    // missing fields are empty, not a crash
    let (status, body) = send(&app, "POST", "/users", json_body(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Full name cannot be empty");
    Ok(())
}

#[tokio::test]
async fn malformed_envelope_is_server_error() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "POST", "/users", Some(Body::from("{not json"))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("malformed request"));

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        json_body(json!({"full_name": "Asha", "mob_num": 1234567890u64, "pan_num": "ABCDE1234F"})),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, "DELETE", "/users", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, listed) = send(&app, "GET", "/users", None).await?;
    assert_eq!(listed, json!({"users": []}));
    Ok(())
}

#[tokio::test]
async fn list_all_projects_every_record() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"users": []}));

    let mut ids = Vec::new();
    for (name, pan) in [("A One", "AAAAA1111A"), ("B Two", "BBBBB2222B"), ("C Three", "CCCCC3333C")] {
        ids.push(create(&app, json!({"full_name": name, "mob_num": "1234567890", "pan_num": pan})).await?);
    }

    let (status, body) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().cloned().unwrap_or_default();
    assert_eq!(users.len(), 3);
    for u in &users {
        let obj = u.as_object().expect("record object");
        assert_eq!(obj.len(), 4);
        assert!(ids.iter().any(|id| u["user_id"] == *id));
        assert_eq!(u["mob_num"], "1234567890");
    }
    Ok(())
}

#[tokio::test]
async fn get_one_missing_and_unknown_ids() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/user", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID is required");

    let (status, body) = send(&app, "GET", "/user?user_id=does-not-exist", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found!");
    Ok(())
}

#[tokio::test]
async fn update_validates_present_fields_only() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, asha()).await?;

    let (status, body) = send(
        &app,
        "PUT",
        "/users",
        json_body(json!({"user_id": &id, "update_data": {"mob_num": "999"}})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid mobile number format");

    let (_, got) = send(&app, "GET", &format!("/user?user_id={id}"), None).await?;
    assert_eq!(got["full_name"], "Asha Rao");
    assert_eq!(got["mob_num"], "1234567890");
    assert_eq!(got["pan_num"], "ABCDE1234F");

    let (status, body) = send(&app, "PUT", "/users", json_body(json!({"user_id": &id, "update_data": {}}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    let (_, unchanged) = send(&app, "GET", &format!("/user?user_id={id}"), None).await?;
    assert_eq!(unchanged, got);

    let (status, _) = send(
        &app,
        "PUT",
        "/users",
        json_body(json!({"user_id": &id, "update_data": {"full_name": "Asha R", "pan_num": "PQRST6789Z"}})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let (_, updated) = send(&app, "GET", &format!("/user?user_id={id}"), None).await?;
    assert_eq!(updated["user_id"], id.as_str());
    assert_eq!(updated["full_name"], "Asha R");
    assert_eq!(updated["mob_num"], "1234567890");
    assert_eq!(updated["pan_num"], "PQRST6789Z");
    Ok(())
}

#[tokio::test]
async fn update_unknown_or_missing_id() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/users",
        json_body(json!({"user_id": "ghost", "update_data": {"full_name": "X"}})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found!");

    let (status, body) = send(&app, "PUT", "/users", json_body(json!({"update_data": {}}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID is required");
    Ok(())
}

#[tokio::test]
async fn delete_twice_then_not_found() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, asha()).await?;

    let (status, body) = send(&app, "DELETE", "/users", json_body(json!({"user_id": &id}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, body) = send(&app, "DELETE", "/users", json_body(json!({"user_id": &id}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found!");

    let (status, _) = send(&app, "GET", &format!("/user?user_id={id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_without_user_id_is_server_error() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, asha()).await?;

    for body in [json!({}), json!({"user_id": null}), json!({"user_id": ""})] {
        let (status, body) = send(&app, "DELETE", "/users", json_body(body)).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "delete key user_id is missing");
    }

    let (status, _) = send(&app, "GET", &format!("/user?user_id={id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
