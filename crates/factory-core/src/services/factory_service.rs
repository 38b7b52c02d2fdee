// ============================================================================
// Factory Core - Factory Service
// File: crates/factory-core/src/services/factory_service.rs
// ============================================================================
//! Factory (tenant) management and owner provisioning

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use factory_security::PasswordService;
use factory_shared::config::ProvisioningSettings;
use factory_shared::EntityId;

use crate::access::Principal;
use crate::domain::{Factory, FactoryChanges, FactoryDetails, NewFactory, NewUser};
use crate::error::DomainError;
use crate::repositories::{EquipmentRepository, FactoryRepository, UserRepository};

pub struct FactoryService {
    factory_repo: Arc<dyn FactoryRepository>,
    user_repo: Arc<dyn UserRepository>,
    equipment_repo: Arc<dyn EquipmentRepository>,
    provisioning: ProvisioningSettings,
}

impl FactoryService {
    pub fn new(
        factory_repo: Arc<dyn FactoryRepository>,
        user_repo: Arc<dyn UserRepository>,
        equipment_repo: Arc<dyn EquipmentRepository>,
        provisioning: ProvisioningSettings,
    ) -> Self {
        Self {
            factory_repo,
            user_repo,
            equipment_repo,
            provisioning,
        }
    }

    /// Create a factory together with its owner login.
    ///
    /// The owner gets a random `<uuid>@<domain>` email, the configured
    /// default password and staff status.
    pub async fn create(
        &self,
        caller: &Principal,
        factory: NewFactory,
    ) -> Result<FactoryDetails, DomainError> {
        caller.require_staff()?;
        factory.validate()?;

        let owner = self.owner_for(&factory)?;
        let (factory, owner) = self.factory_repo.create_with_owner(&factory, &owner).await?;

        info!(
            "Factory {} created by {} with owner {}",
            factory.id, caller.user_id, owner.id
        );

        Ok(FactoryDetails {
            factory,
            members: vec![owner.clone()],
            owner: Some(owner),
            equipment: Vec::new(),
        })
    }

    /// Staff see every factory, everyone else only their own.
    pub async fn list(&self, caller: &Principal) -> Result<Vec<FactoryDetails>, DomainError> {
        let factories = if caller.is_privileged() {
            self.factory_repo.list().await?
        } else {
            match caller.factory_id {
                Some(id) => self.factory_repo.find_by_id(id).await?.into_iter().collect(),
                None => Vec::new(),
            }
        };

        let mut details = Vec::with_capacity(factories.len());
        for factory in factories {
            details.push(self.details(factory).await?);
        }
        Ok(details)
    }

    /// Foreign factories are reported as missing.
    pub async fn get(&self, caller: &Principal, id: EntityId) -> Result<FactoryDetails, DomainError> {
        let factory = self.find(id).await?;
        if !caller.is_member_or_staff(factory.id) {
            warn!("User {} attempted to read factory {}", caller.user_id, id);
            return Err(DomainError::not_found("Factory", id));
        }
        self.details(factory).await
    }

    pub async fn update(
        &self,
        caller: &Principal,
        id: EntityId,
        changes: FactoryChanges,
    ) -> Result<FactoryDetails, DomainError> {
        let mut factory = self.find(id).await?;
        caller.require_member_or_staff(factory.id)?;

        factory.apply(changes);
        factory.validate()?;

        let factory = self.factory_repo.update(&factory).await?;
        info!("Factory {} updated by {}", factory.id, caller.user_id);
        self.details(factory).await
    }

    /// Equipment and properties go with the factory; its users stay,
    /// unlinked.
    pub async fn delete(&self, caller: &Principal, id: EntityId) -> Result<(), DomainError> {
        caller.require_staff()?;
        if !self.factory_repo.delete(id).await? {
            return Err(DomainError::not_found("Factory", id));
        }
        info!("Factory {} deleted by {}", id, caller.user_id);
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<Factory, DomainError> {
        self.factory_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Factory", id))
    }

    async fn details(&self, factory: Factory) -> Result<FactoryDetails, DomainError> {
        let owner = match factory.owner_id {
            Some(owner_id) => self.user_repo.find_by_id(owner_id).await?,
            None => None,
        };
        let members = self.user_repo.list(Some(factory.id)).await?;
        let equipment = self.equipment_repo.list_by_factory(factory.id).await?;

        Ok(FactoryDetails {
            factory,
            owner,
            members,
            equipment,
        })
    }

    fn owner_for(&self, factory: &NewFactory) -> Result<NewUser, DomainError> {
        let password_hash = PasswordService::hash(&self.provisioning.default_password)?;
        Ok(NewUser {
            email: format!("{}@{}", Uuid::new_v4(), self.provisioning.email_domain),
            password_hash,
            name: Some(factory.name.clone()),
            surname: self.provisioning.default_surname.clone(),
            is_active: true,
            is_staff: true,
            is_superuser: false,
            factory_id: None,
        })
    }
}
