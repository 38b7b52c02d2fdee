//! User bodies. The password is write-only.

use serde::{Deserialize, Serialize};

use factory_core::{CreateUser, User, UserChanges};
use factory_shared::utils::deserialize_nullable;
use factory_shared::EntityId;

use super::UpdateMode;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub email: String,
    pub name: Option<String>,
    pub surname: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub factory: Option<EntityId>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            factory: user.factory_id,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    pub surname: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub factory: Option<EntityId>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            email: req.email,
            password: req.password,
            name: req.name,
            surname: req.surname,
            is_active: req.is_active,
            is_staff: req.is_staff,
            is_superuser: req.is_superuser,
            factory_id: req.factory,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub name: Option<Option<String>>,
    pub surname: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub factory: Option<Option<EntityId>>,
}

impl UpdateUserRequest {
    pub fn into_changes(self, mode: UpdateMode) -> Result<UserChanges, ApiError> {
        mode.require(&[
            ("email", self.email.is_some()),
            ("password", self.password.is_some()),
        ])?;

        Ok(UserChanges {
            email: self.email,
            password: self.password,
            name: self.name,
            surname: self.surname,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            factory_id: self.factory,
        })
    }
}
