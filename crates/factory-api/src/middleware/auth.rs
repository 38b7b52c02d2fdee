// ============================================================================
// Factory API - Bearer Authentication Middleware
// File: crates/factory-api/src/middleware/auth.rs
// ============================================================================

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use factory_core::{Principal, User};

use crate::error::ApiError;
use crate::state::AppState;

/// The user resolved from the request's bearer token.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn principal(&self) -> Principal {
        Principal::from(&self.0)
    }
}

/// Rejects the request with 401 unless it carries a valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized("Authentication credentials were not provided".to_string())
        })?;

    let user = state.services.auth.authenticate_bearer(token).await?;
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
