//! Request and response bodies

use axum::http::Method;

use crate::error::ApiError;

pub mod auth;
pub mod user;
pub mod factory;
pub mod equipment;
pub mod property;

pub use auth::{AccessTokenResponse, TokenObtainRequest, TokenPairResponse, TokenRefreshRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
pub use factory::{CreateFactoryRequest, FactoryResponse, UpdateFactoryRequest};
pub use equipment::{CreateEquipmentRequest, EquipmentResponse, UpdateEquipmentRequest};
pub use property::{CreatePropertyRequest, PropertyResponse, UpdatePropertyRequest};

/// PUT replaces a resource and needs every required field, PATCH does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

impl From<&Method> for UpdateMode {
    fn from(method: &Method) -> Self {
        if *method == Method::PUT {
            UpdateMode::Full
        } else {
            UpdateMode::Partial
        }
    }
}

impl UpdateMode {
    /// Fails a full update that leaves out any of `fields` (name, present).
    pub fn require(self, fields: &[(&str, bool)]) -> Result<(), ApiError> {
        if self == UpdateMode::Partial {
            return Ok(());
        }
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}
