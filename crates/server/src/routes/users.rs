use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use common::types::MessageBody;
use service::domain::{NewUserInput, UserPatch, UserRecord};

use super::AppState;
use crate::{errors::JsonApiError, extract::Envelope};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// User ID to fetch
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub update_data: Option<UserPatch>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeleteUserRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserRecord>,
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CreatedUserDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Malformed request or storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Envelope(input): Envelope<NewUserInput>,
) -> Result<Json<CreatedUser>, JsonApiError> {
    let rec = state.users.create(input).await?;
    info!(user_id = %rec.user_id, "create_user ok");
    Ok(Json(CreatedUser { message: "User created successfully".into(), user_id: rec.user_id }))
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses(
        (status = 200, description = "All users", body = crate::openapi::UserListDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserList>, JsonApiError> {
    let users = state.users.list_all().await?;
    info!(count = users.len(), "list_users ok");
    Ok(Json(UserList { users }))
}

#[utoipa::path(
    get, path = "/user", tag = "users",
    params(UserIdQuery),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserDoc),
        (status = 400, description = "User ID is required", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found!", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(q): Query<UserIdQuery>,
) -> Result<Json<UserRecord>, JsonApiError> {
    let rec = state.users.get_one(q.user_id.as_deref()).await?;
    Ok(Json(rec))
}

#[utoipa::path(
    put, path = "/users", tag = "users",
    request_body = crate::openapi::UpdateUserDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found!", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Malformed request or storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Envelope(req): Envelope<UpdateUserRequest>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let patch = req.update_data.unwrap_or_default();
    state.users.update(req.user_id.as_deref(), patch).await?;
    Ok(Json(MessageBody::new("User updated successfully")))
}

#[utoipa::path(
    delete, path = "/users", tag = "users",
    request_body = crate::openapi::DeleteUserDoc,
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "User not found!", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Malformed request, missing user_id or storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Envelope(req): Envelope<DeleteUserRequest>,
) -> Result<Json<MessageBody>, JsonApiError> {
    state.users.delete(req.user_id.as_deref()).await?;
    Ok(Json(MessageBody::new("User deleted successfully")))
}
