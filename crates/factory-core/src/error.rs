//! Domain errors

use factory_shared::EntityId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not active")]
    UserNotActive,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("{entity} name already exists: {name}")]
    NameAlreadyExists { entity: &'static str, name: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        DomainError::NotFound { entity, id }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<factory_security::PasswordError> for DomainError {
    fn from(e: factory_security::PasswordError) -> Self {
        match e {
            factory_security::PasswordError::Empty => {
                DomainError::ValidationError("password: must not be empty".to_string())
            }
            other => DomainError::PasswordHashError(other.to_string()),
        }
    }
}
