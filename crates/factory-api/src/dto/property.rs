use serde::{Deserialize, Serialize};

use factory_core::{NewProperty, Property, PropertyChanges};
use factory_shared::EntityId;

use super::UpdateMode;
use crate::error::ApiError;

/// The owning equipment comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub description: String,
}

impl From<CreatePropertyRequest> for NewProperty {
    fn from(req: CreatePropertyRequest) -> Self {
        NewProperty {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePropertyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Moves the property to another equipment.
    pub equipment: Option<EntityId>,
}

impl UpdatePropertyRequest {
    pub fn into_changes(self, mode: UpdateMode) -> Result<PropertyChanges, ApiError> {
        mode.require(&[
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
        ])?;

        Ok(PropertyChanges {
            name: self.name,
            description: self.description,
            equipment_id: self.equipment,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub equipment: EntityId,
}

impl From<Property> for PropertyResponse {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            equipment: p.equipment_id,
        }
    }
}
