//! Factory handlers

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Extension, Json,
};

use factory_core::NewFactory;
use factory_shared::EntityId;

use crate::dto::{CreateFactoryRequest, FactoryResponse, UpdateFactoryRequest, UpdateMode};
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// GET /api/factory/
pub async fn list_factories(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<FactoryResponse>>, ApiError> {
    let factories = state.services.factories.list(&current.principal()).await?;
    Ok(Json(factories.into_iter().map(Into::into).collect()))
}

/// POST /api/factory/create/
pub async fn create_factory(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppJson(payload): AppJson<CreateFactoryRequest>,
) -> Result<(StatusCode, Json<FactoryResponse>), ApiError> {
    let factory = NewFactory::new(payload.name, payload.address, payload.city, payload.country)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let details = state
        .services
        .factories
        .create(&current.principal(), factory)
        .await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}

/// GET /api/factory/{id}/
pub async fn get_factory(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<Json<FactoryResponse>, ApiError> {
    let details = state.services.factories.get(&current.principal(), id).await?;
    Ok(Json(details.into()))
}

/// PUT/PATCH /api/factory/update/{id}/
pub async fn update_factory(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    method: Method,
    AppPath(id): AppPath<EntityId>,
    AppJson(payload): AppJson<UpdateFactoryRequest>,
) -> Result<Json<FactoryResponse>, ApiError> {
    let changes = payload.into_changes(UpdateMode::from(&method))?;
    let details = state
        .services
        .factories
        .update(&current.principal(), id, changes)
        .await?;
    Ok(Json(details.into()))
}

/// DELETE /api/factory/delete/{id}/
pub async fn delete_factory(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<StatusCode, ApiError> {
    state.services.factories.delete(&current.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
