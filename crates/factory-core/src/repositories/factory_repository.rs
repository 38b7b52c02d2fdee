//! Factory repository trait (port)

use async_trait::async_trait;

use factory_shared::EntityId;

use crate::domain::{Factory, NewFactory, NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FactoryRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Factory>, DomainError>;
    async fn list(&self) -> Result<Vec<Factory>, DomainError>;
    /// Inserts the factory and its owner in one transaction: the owner is
    /// linked to the factory and recorded as `owner_id`.
    async fn create_with_owner(
        &self,
        factory: &NewFactory,
        owner: &NewUser,
    ) -> Result<(Factory, User), DomainError>;
    async fn update(&self, factory: &Factory) -> Result<Factory, DomainError>;
    /// Cascades to equipment and properties, nulls the members' link.
    async fn delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
