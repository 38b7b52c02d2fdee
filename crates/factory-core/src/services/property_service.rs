//! Equipment property management, scoped through the owning equipment

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use factory_shared::EntityId;

use crate::access::Principal;
use crate::domain::{Equipment, NewProperty, Property, PropertyChanges};
use crate::error::DomainError;
use crate::repositories::{EquipmentRepository, PropertyRepository};

pub struct PropertyService {
    property_repo: Arc<dyn PropertyRepository>,
    equipment_repo: Arc<dyn EquipmentRepository>,
}

impl PropertyService {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        equipment_repo: Arc<dyn EquipmentRepository>,
    ) -> Self {
        Self {
            property_repo,
            equipment_repo,
        }
    }

    pub async fn create(
        &self,
        caller: &Principal,
        equipment_id: EntityId,
        mut input: NewProperty,
    ) -> Result<Property, DomainError> {
        let equipment = self.equipment(equipment_id).await?;
        caller.require_member_or_staff(equipment.factory_id)?;

        input.name = input.name.trim().to_string();
        input.validate()?;

        let property = self.property_repo.create(equipment_id, &input).await?;
        info!(
            "Property {} created on equipment {} by {}",
            property.id, equipment_id, caller.user_id
        );
        Ok(property)
    }

    pub async fn list(
        &self,
        caller: &Principal,
        equipment_id: EntityId,
    ) -> Result<Vec<Property>, DomainError> {
        let equipment = self.equipment(equipment_id).await?;
        caller.require_member_or_staff(equipment.factory_id)?;
        self.property_repo.list_by_equipment(equipment_id).await
    }

    /// Properties of foreign equipment are reported as missing.
    pub async fn get(&self, caller: &Principal, id: EntityId) -> Result<Property, DomainError> {
        let property = self.find(id).await?;
        let factory_id = self.owning_factory(&property).await?;
        if !caller.is_member_or_staff(factory_id) {
            warn!("User {} attempted to read property {}", caller.user_id, id);
            return Err(DomainError::not_found("Property", id));
        }
        Ok(property)
    }

    /// Moving a property requires access to both the current and the target
    /// equipment.
    pub async fn update(
        &self,
        caller: &Principal,
        id: EntityId,
        changes: PropertyChanges,
    ) -> Result<Property, DomainError> {
        let mut property = self.find(id).await?;
        caller.require_member_or_staff(self.owning_factory(&property).await?)?;

        if let Some(target_id) = changes.equipment_id {
            if target_id != property.equipment_id {
                let target = self
                    .equipment_repo
                    .find_by_id(target_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::ValidationError(format!(
                            "equipment: {} does not exist",
                            target_id
                        ))
                    })?;
                caller.require_member_or_staff(target.factory_id)?;
            }
        }

        property.apply(changes);
        property.validate()?;

        let property = self.property_repo.update(&property).await?;
        info!("Property {} updated by {}", property.id, caller.user_id);
        Ok(property)
    }

    pub async fn delete(&self, caller: &Principal, id: EntityId) -> Result<(), DomainError> {
        let property = self.find(id).await?;
        caller.require_member_or_staff(self.owning_factory(&property).await?)?;

        if !self.property_repo.delete(id).await? {
            return Err(DomainError::not_found("Property", id));
        }
        info!("Property {} deleted by {}", id, caller.user_id);
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<Property, DomainError> {
        self.property_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", id))
    }

    async fn equipment(&self, id: EntityId) -> Result<Equipment, DomainError> {
        self.equipment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Equipment", id))
    }

    async fn owning_factory(&self, property: &Property) -> Result<EntityId, DomainError> {
        // The foreign key guarantees the equipment exists unless it was
        // removed concurrently.
        self.equipment_repo
            .find_by_id(property.equipment_id)
            .await?
            .map(|equipment| equipment.factory_id)
            .ok_or_else(|| DomainError::not_found("Property", property.id))
    }
}
