//! # Factory Core - Domain Module
//!
//! Domain entities for the factory registry.

pub mod user;
pub mod factory;
pub mod equipment;
pub mod property;

// Re-export all entities and inputs
pub use user::{CreateUser, NewUser, User, UserChanges};
pub use factory::{Factory, FactoryChanges, FactoryDetails, NewFactory};
pub use equipment::{Equipment, EquipmentChanges, NewEquipment};
pub use property::{NewProperty, Property, PropertyChanges};
