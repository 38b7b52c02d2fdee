//! Equipment property handlers

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Extension, Json,
};

use factory_shared::EntityId;

use crate::dto::{CreatePropertyRequest, PropertyResponse, UpdateMode, UpdatePropertyRequest};
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// POST /api/equipment/create_property/{equipment_id}/
pub async fn create_property(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(equipment_id): AppPath<EntityId>,
    AppJson(payload): AppJson<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>), ApiError> {
    let property = state
        .services
        .properties
        .create(&current.principal(), equipment_id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(property.into())))
}

/// GET /api/equipment/properties/{equipment_id}/
pub async fn list_properties(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(equipment_id): AppPath<EntityId>,
) -> Result<Json<Vec<PropertyResponse>>, ApiError> {
    let properties = state
        .services
        .properties
        .list(&current.principal(), equipment_id)
        .await?;
    Ok(Json(properties.into_iter().map(Into::into).collect()))
}

/// GET /api/equipment/property/{id}/
pub async fn get_property(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let property = state.services.properties.get(&current.principal(), id).await?;
    Ok(Json(property.into()))
}

/// PUT/PATCH /api/equipment/update_property/{id}/
pub async fn update_property(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    method: Method,
    AppPath(id): AppPath<EntityId>,
    AppJson(payload): AppJson<UpdatePropertyRequest>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let changes = payload.into_changes(UpdateMode::from(&method))?;
    let property = state
        .services
        .properties
        .update(&current.principal(), id, changes)
        .await?;
    Ok(Json(property.into()))
}

/// DELETE /api/equipment/delete_property/{id}/
pub async fn delete_property(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<StatusCode, ApiError> {
    state.services.properties.delete(&current.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
