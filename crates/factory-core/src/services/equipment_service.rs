//! Equipment management, scoped by factory

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use factory_shared::EntityId;

use crate::access::Principal;
use crate::domain::{Equipment, EquipmentChanges, NewEquipment};
use crate::error::DomainError;
use crate::repositories::{EquipmentRepository, FactoryRepository};

pub struct EquipmentService {
    equipment_repo: Arc<dyn EquipmentRepository>,
    factory_repo: Arc<dyn FactoryRepository>,
}

impl EquipmentService {
    pub fn new(
        equipment_repo: Arc<dyn EquipmentRepository>,
        factory_repo: Arc<dyn FactoryRepository>,
    ) -> Self {
        Self {
            equipment_repo,
            factory_repo,
        }
    }

    /// Any authenticated caller may register equipment on an existing factory.
    pub async fn create(
        &self,
        caller: &Principal,
        factory_id: EntityId,
        mut input: NewEquipment,
    ) -> Result<Equipment, DomainError> {
        self.ensure_factory(factory_id).await?;

        input.name = input.name.trim().to_string();
        input.validate()?;

        let equipment = self.equipment_repo.create(factory_id, &input).await?;
        info!(
            "Equipment {} created in factory {} by {}",
            equipment.id, factory_id, caller.user_id
        );
        Ok(equipment)
    }

    pub async fn list(
        &self,
        caller: &Principal,
        factory_id: EntityId,
    ) -> Result<Vec<Equipment>, DomainError> {
        self.ensure_factory(factory_id).await?;
        caller.require_member_or_staff(factory_id)?;
        self.equipment_repo.list_by_factory(factory_id).await
    }

    /// Equipment of a foreign factory is reported as missing.
    pub async fn get(&self, caller: &Principal, id: EntityId) -> Result<Equipment, DomainError> {
        let equipment = self.find(id).await?;
        if !caller.is_member_or_staff(equipment.factory_id) {
            warn!("User {} attempted to read equipment {}", caller.user_id, id);
            return Err(DomainError::not_found("Equipment", id));
        }
        Ok(equipment)
    }

    pub async fn update(
        &self,
        caller: &Principal,
        id: EntityId,
        changes: EquipmentChanges,
    ) -> Result<Equipment, DomainError> {
        let mut equipment = self.find(id).await?;
        caller.require_member_or_staff(equipment.factory_id)?;

        equipment.apply(changes);
        equipment.validate()?;

        let equipment = self.equipment_repo.update(&equipment).await?;
        info!("Equipment {} updated by {}", equipment.id, caller.user_id);
        Ok(equipment)
    }

    /// Properties of the equipment are removed with it.
    pub async fn delete(&self, caller: &Principal, id: EntityId) -> Result<(), DomainError> {
        let equipment = self.find(id).await?;
        caller.require_member_or_staff(equipment.factory_id)?;

        if !self.equipment_repo.delete(id).await? {
            return Err(DomainError::not_found("Equipment", id));
        }
        info!("Equipment {} deleted by {}", id, caller.user_id);
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<Equipment, DomainError> {
        self.equipment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Equipment", id))
    }

    async fn ensure_factory(&self, factory_id: EntityId) -> Result<(), DomainError> {
        match self.factory_repo.find_by_id(factory_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Factory", factory_id)),
        }
    }
}
