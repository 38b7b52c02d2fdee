// ============================================================================
// Factory Core - Factory Entity
// File: crates/factory-core/src/domain/factory.rs
// Description: Tenant entity; unit of data isolation
// ============================================================================

use chrono::{DateTime, Utc};
use validator::Validate;

use factory_shared::EntityId;

use super::{Equipment, User};

/// Factory (tenant) entity
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Factory {
    pub id: EntityId,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Address must be between 1 and 255 characters"))]
    pub address: String,

    #[validate(length(min = 1, max = 255, message = "City must be between 1 and 255 characters"))]
    pub city: String,

    #[validate(length(min = 1, max = 255, message = "Country must be between 1 and 255 characters"))]
    pub country: String,

    /// Login provisioned together with the factory. Cleared when that user
    /// is deleted.
    pub owner_id: Option<EntityId>,

    pub created_at: DateTime<Utc>,
}

impl Factory {
    pub fn apply(&mut self, changes: FactoryChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(address) = changes.address {
            self.address = address.trim().to_string();
        }
        if let Some(city) = changes.city {
            self.city = city.trim().to_string();
        }
        if let Some(country) = changes.country {
            self.country = country.trim().to_string();
        }
    }
}

/// Factory creation input
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewFactory {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Address must be between 1 and 255 characters"))]
    pub address: String,

    #[validate(length(min = 1, max = 255, message = "City must be between 1 and 255 characters"))]
    pub city: String,

    #[validate(length(min = 1, max = 255, message = "Country must be between 1 and 255 characters"))]
    pub country: String,
}

impl NewFactory {
    pub fn new(
        name: String,
        address: String,
        city: String,
        country: String,
    ) -> Result<Self, validator::ValidationErrors> {
        let factory = Self {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            city: city.trim().to_string(),
            country: country.trim().to_string(),
        };

        factory.validate()?;
        Ok(factory)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FactoryChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Factory together with its owner, members and equipment.
#[derive(Debug, Clone)]
pub struct FactoryDetails {
    pub factory: Factory,
    pub owner: Option<User>,
    pub members: Vec<User>,
    pub equipment: Vec<Equipment>,
}
