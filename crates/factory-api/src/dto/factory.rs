use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use factory_core::{FactoryChanges, FactoryDetails};
use factory_shared::EntityId;

use super::UpdateMode;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateFactoryRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFactoryRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl UpdateFactoryRequest {
    pub fn into_changes(self, mode: UpdateMode) -> Result<FactoryChanges, ApiError> {
        mode.require(&[
            ("name", self.name.is_some()),
            ("address", self.address.is_some()),
            ("city", self.city.is_some()),
            ("country", self.country.is_some()),
        ])?;

        Ok(FactoryChanges {
            name: self.name,
            address: self.address,
            city: self.city,
            country: self.country,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FactoryMember {
    pub id: EntityId,
    pub email: String,
    pub is_staff: bool,
}

#[derive(Debug, Serialize)]
pub struct FactoryEquipment {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub date: NaiveDate,
    pub status: bool,
}

/// Factory with its owner, members and equipment.
#[derive(Debug, Serialize)]
pub struct FactoryResponse {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub user_id: Option<EntityId>,
    pub user_email: Option<String>,
    pub all_users: Vec<FactoryMember>,
    pub equipments: Vec<FactoryEquipment>,
}

impl From<FactoryDetails> for FactoryResponse {
    fn from(details: FactoryDetails) -> Self {
        let FactoryDetails {
            factory,
            owner,
            members,
            equipment,
        } = details;

        Self {
            id: factory.id,
            name: factory.name,
            address: factory.address,
            city: factory.city,
            country: factory.country,
            user_id: owner.as_ref().map(|u| u.id),
            user_email: owner.map(|u| u.email),
            all_users: members
                .into_iter()
                .map(|u| FactoryMember {
                    id: u.id,
                    email: u.email,
                    is_staff: u.is_staff,
                })
                .collect(),
            equipments: equipment
                .into_iter()
                .map(|e| FactoryEquipment {
                    id: e.id,
                    name: e.name,
                    description: e.description,
                    price: e.price,
                    date: e.date,
                    status: e.status,
                })
                .collect(),
        }
    }
}
