//! Equipment handlers

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Extension, Json,
};

use factory_shared::EntityId;

use crate::dto::{CreateEquipmentRequest, EquipmentResponse, UpdateEquipmentRequest, UpdateMode};
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// POST /api/equipment/create/{factory_id}/
pub async fn create_equipment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(factory_id): AppPath<EntityId>,
    AppJson(payload): AppJson<CreateEquipmentRequest>,
) -> Result<(StatusCode, Json<EquipmentResponse>), ApiError> {
    let equipment = state
        .services
        .equipment
        .create(&current.principal(), factory_id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(equipment.into())))
}

/// GET /api/equipment/list/{factory_id}/
pub async fn list_equipment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(factory_id): AppPath<EntityId>,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let equipment = state
        .services
        .equipment
        .list(&current.principal(), factory_id)
        .await?;
    Ok(Json(equipment.into_iter().map(Into::into).collect()))
}

/// GET /api/equipment/{id}/
pub async fn get_equipment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let equipment = state.services.equipment.get(&current.principal(), id).await?;
    Ok(Json(equipment.into()))
}

/// PUT/PATCH /api/equipment/update/{id}/
pub async fn update_equipment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    method: Method,
    AppPath(id): AppPath<EntityId>,
    AppJson(payload): AppJson<UpdateEquipmentRequest>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let changes = payload.into_changes(UpdateMode::from(&method))?;
    let equipment = state
        .services
        .equipment
        .update(&current.principal(), id, changes)
        .await?;
    Ok(Json(equipment.into()))
}

/// DELETE /api/equipment/delete/{id}/
pub async fn delete_equipment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppPath(id): AppPath<EntityId>,
) -> Result<StatusCode, ApiError> {
    state.services.equipment.delete(&current.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
