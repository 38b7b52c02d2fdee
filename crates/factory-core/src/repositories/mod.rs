//! Repository traits (ports)

use std::sync::Arc;

pub mod user_repository;
pub mod factory_repository;
pub mod equipment_repository;
pub mod property_repository;

pub use user_repository::UserRepository;
pub use factory_repository::FactoryRepository;
pub use equipment_repository::EquipmentRepository;
pub use property_repository::PropertyRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use factory_repository::MockFactoryRepository;
#[cfg(test)]
pub use equipment_repository::MockEquipmentRepository;
#[cfg(test)]
pub use property_repository::MockPropertyRepository;

/// One adapter per store, handed to the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub factories: Arc<dyn FactoryRepository>,
    pub equipment: Arc<dyn EquipmentRepository>,
    pub properties: Arc<dyn PropertyRepository>,
}
