//! User repository trait (port)

use async_trait::async_trait;

use factory_shared::EntityId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// All users ordered by id, or only the members of `factory_id`.
    async fn list(&self, factory_id: Option<EntityId>) -> Result<Vec<User>, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    /// Writes every column except `last_login`.
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    /// Stamps `last_login` with the current time and touches nothing else.
    async fn record_login(&self, id: EntityId) -> Result<(), DomainError>;
    /// Returns `false` when no row matched.
    async fn delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
