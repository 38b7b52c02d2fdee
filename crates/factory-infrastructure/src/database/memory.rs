//! In-memory store
//!
//! Implements every repository over one shared state behind a tokio
//! `RwLock`. Unique keys, foreign keys and cascades behave like the
//! PostgreSQL schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use factory_core::domain::{
    Equipment, Factory, NewEquipment, NewFactory, NewProperty, NewUser, Property, User,
};
use factory_core::error::DomainError;
use factory_core::repositories::{
    EquipmentRepository, FactoryRepository, PropertyRepository, Repositories, UserRepository,
};
use factory_shared::EntityId;

/// Matches the `LOWER(email)` unique index.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Default)]
struct State {
    users: BTreeMap<EntityId, User>,
    factories: BTreeMap<EntityId, Factory>,
    equipment: BTreeMap<EntityId, Equipment>,
    properties: BTreeMap<EntityId, Property>,
    last_id: EntityId,
}

impl State {
    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        self.last_id
    }

    fn check_email(&self, email: &str, except: Option<EntityId>) -> Result<(), DomainError> {
        let taken = self
            .users
            .values()
            .any(|u| Some(u.id) != except && same_email(&u.email, email));
        if taken {
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }
        Ok(())
    }

    fn check_factory(&self, factory_id: Option<EntityId>) -> Result<(), DomainError> {
        match factory_id {
            Some(id) if !self.factories.contains_key(&id) => Err(DomainError::ValidationError(
                format!("factory: {} does not exist", id),
            )),
            _ => Ok(()),
        }
    }

    fn check_equipment_name(&self, name: &str, except: Option<EntityId>) -> Result<(), DomainError> {
        if self.equipment.values().any(|e| Some(e.id) != except && e.name == name) {
            return Err(DomainError::NameAlreadyExists {
                entity: "Equipment",
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_property_name(&self, name: &str, except: Option<EntityId>) -> Result<(), DomainError> {
        if self.properties.values().any(|p| Some(p.id) != except && p.name == name) {
            return Err(DomainError::NameAlreadyExists {
                entity: "Property",
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert_user(&mut self, user: &NewUser, factory_id: Option<EntityId>) -> User {
        let id = self.next_id();
        let created = User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            factory_id,
            date_joined: Utc::now(),
            last_login: None,
        };
        self.users.insert(id, created.clone());
        created
    }

    fn remove_equipment(&mut self, id: EntityId) -> bool {
        if self.equipment.remove(&id).is_none() {
            return false;
        }
        self.properties.retain(|_, p| p.equipment_id != id);
        true
    }
}

/// Shared in-memory database; cheap to clone.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository handles that all read and write this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(MemoryUserRepository(self.clone())),
            factories: Arc::new(MemoryFactoryRepository(self.clone())),
            equipment: Arc::new(MemoryEquipmentRepository(self.clone())),
            properties: Arc::new(MemoryPropertyRepository(self.clone())),
        }
    }
}

pub struct MemoryUserRepository(InMemoryStore);
pub struct MemoryFactoryRepository(InMemoryStore);
pub struct MemoryEquipmentRepository(InMemoryStore);
pub struct MemoryPropertyRepository(InMemoryStore);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        Ok(self.0.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.0.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn list(&self, factory_id: Option<EntityId>) -> Result<Vec<User>, DomainError> {
        let state = self.0.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| factory_id.is_none() || u.factory_id == factory_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut state = self.0.state.write().await;
        state.check_email(&user.email, None)?;
        state.check_factory(user.factory_id)?;
        Ok(state.insert_user(user, user.factory_id))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut state = self.0.state.write().await;
        if !state.users.contains_key(&user.id) {
            return Err(DomainError::not_found("User", user.id));
        }
        state.check_email(&user.email, Some(user.id))?;
        state.check_factory(user.factory_id)?;

        let mut stored = user.clone();
        if let Some(previous) = state.users.get(&user.id) {
            stored.date_joined = previous.date_joined;
            stored.last_login = previous.last_login;
        }
        state.users.insert(user.id, stored.clone());
        Ok(stored)
    }

    async fn record_login(&self, id: EntityId) -> Result<(), DomainError> {
        if let Some(user) = self.0.state.write().await.users.get_mut(&id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let mut state = self.0.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        for factory in state.factories.values_mut() {
            if factory.owner_id == Some(id) {
                factory.owner_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl FactoryRepository for MemoryFactoryRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Factory>, DomainError> {
        Ok(self.0.state.read().await.factories.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Factory>, DomainError> {
        Ok(self.0.state.read().await.factories.values().cloned().collect())
    }

    async fn create_with_owner(
        &self,
        factory: &NewFactory,
        owner: &NewUser,
    ) -> Result<(Factory, User), DomainError> {
        let mut state = self.0.state.write().await;
        state.check_email(&owner.email, None)?;

        let id = state.next_id();
        let mut created = Factory {
            id,
            name: factory.name.clone(),
            address: factory.address.clone(),
            city: factory.city.clone(),
            country: factory.country.clone(),
            owner_id: None,
            created_at: Utc::now(),
        };
        let user = state.insert_user(owner, Some(id));
        created.owner_id = Some(user.id);
        state.factories.insert(id, created.clone());

        Ok((created, user))
    }

    async fn update(&self, factory: &Factory) -> Result<Factory, DomainError> {
        let mut state = self.0.state.write().await;
        let stored = state
            .factories
            .get_mut(&factory.id)
            .ok_or_else(|| DomainError::not_found("Factory", factory.id))?;

        stored.name = factory.name.clone();
        stored.address = factory.address.clone();
        stored.city = factory.city.clone();
        stored.country = factory.country.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let mut state = self.0.state.write().await;
        if state.factories.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<EntityId> = state
            .equipment
            .values()
            .filter(|e| e.factory_id == id)
            .map(|e| e.id)
            .collect();
        for equipment_id in owned {
            state.remove_equipment(equipment_id);
        }
        for user in state.users.values_mut() {
            if user.factory_id == Some(id) {
                user.factory_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl EquipmentRepository for MemoryEquipmentRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Equipment>, DomainError> {
        Ok(self.0.state.read().await.equipment.get(&id).cloned())
    }

    async fn list_by_factory(&self, factory_id: EntityId) -> Result<Vec<Equipment>, DomainError> {
        let state = self.0.state.read().await;
        Ok(state
            .equipment
            .values()
            .filter(|e| e.factory_id == factory_id)
            .cloned()
            .collect())
    }

    async fn create(&self, factory_id: EntityId, equipment: &NewEquipment) -> Result<Equipment, DomainError> {
        let mut state = self.0.state.write().await;
        state.check_factory(Some(factory_id))?;
        state.check_equipment_name(&equipment.name, None)?;

        let id = state.next_id();
        let created = Equipment {
            id,
            factory_id,
            name: equipment.name.clone(),
            description: equipment.description.clone(),
            price: equipment.price,
            date: equipment.date,
            status: equipment.status,
        };
        state.equipment.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, equipment: &Equipment) -> Result<Equipment, DomainError> {
        let mut state = self.0.state.write().await;
        state.check_equipment_name(&equipment.name, Some(equipment.id))?;

        let stored = state
            .equipment
            .get_mut(&equipment.id)
            .ok_or_else(|| DomainError::not_found("Equipment", equipment.id))?;
        stored.name = equipment.name.clone();
        stored.description = equipment.description.clone();
        stored.price = equipment.price;
        stored.date = equipment.date;
        stored.status = equipment.status;
        Ok(stored.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        Ok(self.0.state.write().await.remove_equipment(id))
    }
}

#[async_trait]
impl PropertyRepository for MemoryPropertyRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Property>, DomainError> {
        Ok(self.0.state.read().await.properties.get(&id).cloned())
    }

    async fn list_by_equipment(&self, equipment_id: EntityId) -> Result<Vec<Property>, DomainError> {
        let state = self.0.state.read().await;
        Ok(state
            .properties
            .values()
            .filter(|p| p.equipment_id == equipment_id)
            .cloned()
            .collect())
    }

    async fn create(&self, equipment_id: EntityId, property: &NewProperty) -> Result<Property, DomainError> {
        let mut state = self.0.state.write().await;
        if !state.equipment.contains_key(&equipment_id) {
            return Err(DomainError::ValidationError(format!(
                "equipment: {} does not exist",
                equipment_id
            )));
        }
        state.check_property_name(&property.name, None)?;

        let id = state.next_id();
        let created = Property {
            id,
            equipment_id,
            name: property.name.clone(),
            description: property.description.clone(),
        };
        state.properties.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, property: &Property) -> Result<Property, DomainError> {
        let mut state = self.0.state.write().await;
        if !state.properties.contains_key(&property.id) {
            return Err(DomainError::not_found("Property", property.id));
        }
        if !state.equipment.contains_key(&property.equipment_id) {
            return Err(DomainError::ValidationError(format!(
                "equipment: {} does not exist",
                property.equipment_id
            )));
        }
        state.check_property_name(&property.name, Some(property.id))?;

        state.properties.insert(property.id, property.clone());
        Ok(property.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        Ok(self.0.state.write().await.properties.remove(&id).is_some())
    }
}
