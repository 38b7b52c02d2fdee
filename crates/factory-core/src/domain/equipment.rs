// ============================================================================
// Factory Core - Equipment Entity
// File: crates/factory-core/src/domain/equipment.rs
// Description: Equipment owned by a factory
// ============================================================================

use chrono::NaiveDate;
use validator::Validate;

use factory_shared::EntityId;

/// Equipment entity. `name` is unique across all factories.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Equipment {
    pub id: EntityId,
    pub factory_id: EntityId,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,

    pub price: f64,
    pub date: NaiveDate,
    pub status: bool,
}

impl Equipment {
    pub fn apply(&mut self, changes: EquipmentChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

/// Equipment creation input; the owning factory comes from the request path.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewEquipment {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,

    pub price: f64,
    pub date: NaiveDate,
    pub status: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EquipmentChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub date: Option<NaiveDate>,
    pub status: Option<bool>,
}
