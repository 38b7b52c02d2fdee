//! PostgreSQL repository implementations

use sqlx::PgPool;
use tracing::error;

use factory_core::error::DomainError;
use factory_core::repositories::Repositories;

pub mod user_repo_impl;
pub mod factory_repo_impl;
pub mod equipment_repo_impl;
pub mod property_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use factory_repo_impl::PgFactoryRepository;
pub use equipment_repo_impl::PgEquipmentRepository;
pub use property_repo_impl::PgPropertyRepository;

/// Every repository backed by the same pool.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    use std::sync::Arc;

    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        factories: Arc::new(PgFactoryRepository::new(pool.clone())),
        equipment: Arc::new(PgEquipmentRepository::new(pool.clone())),
        properties: Arc::new(PgPropertyRepository::new(pool)),
    }
}

/// Constraint class of a failed statement.
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

pub(crate) fn violation(e: &sqlx::Error) -> Option<Violation> {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Some(Violation::Unique),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => Some(Violation::ForeignKey),
        _ => None,
    }
}

pub(crate) fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", action, e);
    DomainError::DatabaseError(e.to_string())
}
