//! Domain services (business logic)

use std::sync::Arc;

use factory_security::JwtService;
use factory_shared::config::ProvisioningSettings;

use crate::repositories::Repositories;

pub mod auth_service;
pub mod user_service;
pub mod factory_service;
pub mod equipment_service;
pub mod property_service;

pub use auth_service::AuthService;
pub use user_service::UserService;
pub use factory_service::FactoryService;
pub use equipment_service::EquipmentService;
pub use property_service::PropertyService;

/// Every service, wired to one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub factories: Arc<FactoryService>,
    pub equipment: Arc<EquipmentService>,
    pub properties: Arc<PropertyService>,
}

impl Services {
    pub fn new(repos: Repositories, jwt: Arc<JwtService>, provisioning: ProvisioningSettings) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos.users.clone(), jwt)),
            users: Arc::new(UserService::new(repos.users.clone())),
            factories: Arc::new(FactoryService::new(
                repos.factories.clone(),
                repos.users.clone(),
                repos.equipment.clone(),
                provisioning,
            )),
            equipment: Arc::new(EquipmentService::new(
                repos.equipment.clone(),
                repos.factories.clone(),
            )),
            properties: Arc::new(PropertyService::new(repos.properties, repos.equipment)),
        }
    }
}
