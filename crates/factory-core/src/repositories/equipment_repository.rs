//! Equipment repository trait (port)

use async_trait::async_trait;

use factory_shared::EntityId;

use crate::domain::{Equipment, NewEquipment};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Equipment>, DomainError>;
    async fn list_by_factory(&self, factory_id: EntityId) -> Result<Vec<Equipment>, DomainError>;
    async fn create(&self, factory_id: EntityId, equipment: &NewEquipment) -> Result<Equipment, DomainError>;
    async fn update(&self, equipment: &Equipment) -> Result<Equipment, DomainError>;
    /// Cascades to the equipment's properties.
    async fn delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
