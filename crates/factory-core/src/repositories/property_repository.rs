//! Property repository trait (port)

use async_trait::async_trait;

use factory_shared::EntityId;

use crate::domain::{NewProperty, Property};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Property>, DomainError>;
    async fn list_by_equipment(&self, equipment_id: EntityId) -> Result<Vec<Property>, DomainError>;
    async fn create(&self, equipment_id: EntityId, property: &NewProperty) -> Result<Property, DomainError>;
    async fn update(&self, property: &Property) -> Result<Property, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
