//! Property domain entity

use validator::Validate;

use factory_shared::EntityId;

/// Property of an equipment item. `name` is unique across all equipment.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Property {
    pub id: EntityId,
    pub equipment_id: EntityId,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

impl Property {
    pub fn apply(&mut self, changes: PropertyChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(equipment_id) = changes.equipment_id {
            self.equipment_id = equipment_id;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProperty {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

/// Partial update; `equipment_id` moves the property to another equipment.
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub equipment_id: Option<EntityId>,
}
