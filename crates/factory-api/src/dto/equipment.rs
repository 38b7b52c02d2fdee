use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use factory_core::{Equipment, EquipmentChanges, NewEquipment};
use factory_shared::EntityId;

use super::UpdateMode;
use crate::error::ApiError;

fn default_status() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateEquipmentRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: bool,
}

impl From<CreateEquipmentRequest> for NewEquipment {
    fn from(req: CreateEquipmentRequest) -> Self {
        NewEquipment {
            name: req.name,
            description: req.description,
            price: req.price,
            date: req.date,
            status: req.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub date: Option<NaiveDate>,
    pub status: Option<bool>,
}

impl UpdateEquipmentRequest {
    pub fn into_changes(self, mode: UpdateMode) -> Result<EquipmentChanges, ApiError> {
        mode.require(&[
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("price", self.price.is_some()),
            ("date", self.date.is_some()),
        ])?;

        Ok(EquipmentChanges {
            name: self.name,
            description: self.description,
            price: self.price,
            date: self.date,
            status: self.status,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub date: NaiveDate,
    pub status: bool,
    pub factory: EntityId,
}

impl From<Equipment> for EquipmentResponse {
    fn from(e: Equipment) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            price: e.price,
            date: e.date,
            status: e.status,
            factory: e.factory_id,
        }
    }
}
