// ============================================================================
// Factory API - Auth Handlers
// File: crates/factory-api/src/handlers/auth.rs
// ============================================================================
//! Token obtain and refresh

use axum::{extract::State, Json};

use crate::dto::{AccessTokenResponse, TokenObtainRequest, TokenPairResponse, TokenRefreshRequest};
use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/user/token/
pub async fn obtain_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TokenObtainRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".to_string()));
    }

    let pair = state
        .services
        .auth
        .obtain_pair(&payload.email, &payload.password)
        .await?;
    Ok(Json(pair.into()))
}

/// POST /api/user/token/refresh/
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TokenRefreshRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let access = state.services.auth.refresh(&payload.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}
