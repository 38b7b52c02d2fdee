//! User handlers

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Extension, Json,
};

use factory_shared::EntityId;

use crate::dto::{CreateUserRequest, UpdateMode, UpdateUserRequest, UserResponse};
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// GET /api/user/me/
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(&current.0))
}

/// POST /api/user/create/
pub async fn create_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .services
        .users
        .create(&current.principal(), payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/user/list/
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.services.users.list(&current.principal()).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/user/detail/{id}/
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.services.users.get(&current.principal(), id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT/PATCH /api/user/update/{id}/
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    method: Method,
    AppPath(id): AppPath<EntityId>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let changes = payload.into_changes(UpdateMode::from(&method))?;
    let user = state
        .services
        .users
        .update(&current.principal(), id, changes)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/user/delete/{id}/
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<StatusCode, ApiError> {
    state.services.users.delete(&current.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
