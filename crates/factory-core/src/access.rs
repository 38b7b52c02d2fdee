//! Tenant access control
//!
//! Every resource resolves to the factory that owns it (a property through
//! its equipment). A caller may touch it when they are staff or superuser,
//! or when their own factory is that factory.

use tracing::warn;

use factory_shared::EntityId;

use crate::domain::User;
use crate::error::DomainError;

/// The authenticated caller, as seen by the access checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: EntityId,
    pub factory_id: Option<EntityId>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            factory_id: user.factory_id,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

impl Principal {
    /// Staff and superusers bypass tenant scoping.
    pub fn is_privileged(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    pub fn is_member_or_staff(&self, factory_id: EntityId) -> bool {
        self.is_privileged() || self.factory_id == Some(factory_id)
    }

    pub fn require_staff(&self) -> Result<(), DomainError> {
        if self.is_privileged() {
            return Ok(());
        }
        warn!("User {} denied staff-only operation", self.user_id);
        Err(DomainError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        ))
    }

    pub fn require_superuser(&self) -> Result<(), DomainError> {
        if self.is_superuser {
            return Ok(());
        }
        warn!("User {} denied superuser-only operation", self.user_id);
        Err(DomainError::Forbidden(
            "Only superusers may perform this action".to_string(),
        ))
    }

    pub fn require_member_or_staff(&self, factory_id: EntityId) -> Result<(), DomainError> {
        if self.is_member_or_staff(factory_id) {
            return Ok(());
        }
        warn!("User {} denied access to factory {}", self.user_id, factory_id);
        Err(DomainError::Forbidden(format!(
            "You are not a member of factory {}",
            factory_id
        )))
    }
}
