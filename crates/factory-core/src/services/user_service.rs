// ============================================================================
// Factory Core - User Service
// File: crates/factory-core/src/services/user_service.rs
// ============================================================================
//! User management

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use factory_security::PasswordService;
use factory_shared::utils::{mask_email, normalize_email};
use factory_shared::EntityId;

use crate::access::Principal;
use crate::domain::{CreateUser, NewUser, User, UserChanges};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Create a user without any caller check. Used by the CLI and by the
    /// staff-only [`UserService::create`].
    pub async fn create_user(&self, mut input: CreateUser) -> Result<User, DomainError> {
        input.email = normalize_email(&input.email);
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            warn!("Create user rejected, email taken: {}", mask_email(&input.email));
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        let password_hash = PasswordService::hash(&input.password)?;
        let user = self
            .user_repo
            .create(&NewUser::from_input(input, password_hash))
            .await?;

        info!("User created: {} ({})", user.id, mask_email(&user.email));
        Ok(user)
    }

    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        surname: &str,
    ) -> Result<User, DomainError> {
        let mut input = CreateUser::new(email, password, surname);
        input.is_staff = true;
        input.is_superuser = true;
        self.create_user(input).await
    }

    pub async fn create(&self, caller: &Principal, input: CreateUser) -> Result<User, DomainError> {
        caller.require_staff()?;
        if input.is_superuser {
            caller.require_superuser()?;
        }
        self.create_user(input).await
    }

    /// Staff see every user, everyone else the members of their own factory.
    pub async fn list(&self, caller: &Principal) -> Result<Vec<User>, DomainError> {
        if caller.is_privileged() {
            return self.user_repo.list(None).await;
        }
        match caller.factory_id {
            Some(factory_id) => self.user_repo.list(Some(factory_id)).await,
            None => Ok(self
                .user_repo
                .find_by_id(caller.user_id)
                .await?
                .into_iter()
                .collect()),
        }
    }

    pub async fn get(&self, caller: &Principal, id: EntityId) -> Result<User, DomainError> {
        caller.require_staff()?;
        self.find(id).await
    }

    pub async fn update(
        &self,
        caller: &Principal,
        id: EntityId,
        changes: UserChanges,
    ) -> Result<User, DomainError> {
        caller.require_staff()?;
        if changes.is_superuser == Some(true) {
            caller.require_superuser()?;
        }

        let mut user = self.find(id).await?;
        if user.is_superuser {
            caller.require_superuser()?;
        }

        if let Some(email) = changes.email.as_deref() {
            let email = normalize_email(email);
            if let Some(other) = self.user_repo.find_by_email(&email).await? {
                if other.id != user.id {
                    return Err(DomainError::EmailAlreadyExists(email));
                }
            }
        }

        let password_hash = match changes.password.as_deref() {
            Some(password) => Some(PasswordService::hash(password)?),
            None => None,
        };

        user.apply(changes, password_hash);
        user.validate()?;

        let user = self.user_repo.update(&user).await?;
        info!("User {} updated by {}", user.id, caller.user_id);
        Ok(user)
    }

    pub async fn delete(&self, caller: &Principal, id: EntityId) -> Result<(), DomainError> {
        caller.require_staff()?;
        if caller.user_id == id {
            warn!("User {} tried to delete their own account", id);
            return Err(DomainError::Forbidden(
                "You cannot delete your own account".to_string(),
            ));
        }

        if self.find(id).await?.is_superuser {
            caller.require_superuser()?;
        }

        if !self.user_repo.delete(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        info!("User {} deleted by {}", id, caller.user_id);
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::repositories::MockUserRepository;

    fn user(id: EntityId, factory_id: Option<EntityId>) -> User {
        User {
            id,
            email: format!("user{}@test.com", id),
            password_hash: "$argon2id$stored".to_string(),
            name: None,
            surname: "User".to_string(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            factory_id,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    fn stored(new: &NewUser) -> User {
        User {
            id: 42,
            email: new.email.clone(),
            password_hash: new.password_hash.clone(),
            name: new.name.clone(),
            surname: new.surname.clone(),
            is_active: new.is_active,
            is_staff: new.is_staff,
            is_superuser: new.is_superuser,
            factory_id: new.factory_id,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    fn regular(factory_id: Option<EntityId>) -> Principal {
        Principal { user_id: 1, factory_id, is_staff: false, is_superuser: false }
    }

    fn staff() -> Principal {
        Principal { user_id: 2, factory_id: None, is_staff: true, is_superuser: false }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_normalizes_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(stored(new)));

        let service = UserService::new(Arc::new(repo));
        let created = service
            .create_user(CreateUser::new(" New@EXAMPLE.com ", "pass", "Doe"))
            .await
            .unwrap();

        assert_eq!(created.email, "New@example.com");
        assert_ne!(created.password_hash, "pass");
        assert!(PasswordService::verify("pass", &created.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(user(5, None))));
        repo.expect_create().times(0);

        let service = UserService::new(Arc::new(repo));
        let result = service.create_user(CreateUser::new("user5@test.com", "pass", "Doe")).await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_superuser_sets_both_flags() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|new| Ok(stored(new)));

        let service = UserService::new(Arc::new(repo));
        let admin = service.create_superuser("admin@test.com", "adminpass", "Admin").await.unwrap();
        assert!(admin.is_staff);
        assert!(admin.is_superuser);
    }

    #[tokio::test]
    async fn test_regular_user_cannot_create_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(0);

        let service = UserService::new(Arc::new(repo));
        let result = service
            .create(&regular(Some(1)), CreateUser::new("x@test.com", "pass", "Doe"))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_staff_cannot_grant_superuser() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(0);
        repo.expect_update().times(0);

        let service = UserService::new(Arc::new(repo));
        let mut input = CreateUser::new("x@test.com", "pass", "Doe");
        input.is_superuser = true;
        assert!(matches!(
            service.create(&staff(), input).await,
            Err(DomainError::Forbidden(_))
        ));

        let changes = UserChanges { is_superuser: Some(true), ..Default::default() };
        assert!(matches!(
            service.update(&staff(), 5, changes).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_callers_factory() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|factory_id| match factory_id {
            None => Ok(vec![user(1, Some(1)), user(3, Some(2))]),
            Some(fid) => Ok(vec![user(1, Some(fid))]),
        });
        repo.expect_find_by_id().returning(|id| Ok(Some(user(id, None))));

        let service = UserService::new(Arc::new(repo));
        assert_eq!(service.list(&staff()).await.unwrap().len(), 2);

        let scoped = service.list(&regular(Some(1))).await.unwrap();
        assert!(scoped.iter().all(|u| u.factory_id == Some(1)));

        let alone = service.list(&regular(None)).await.unwrap();
        assert_eq!(alone.len(), 1);
        assert_eq!(alone[0].id, 1);
    }

    #[tokio::test]
    async fn test_update_rehashes_password_and_checks_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(user(id, None))));
        repo.expect_find_by_email().returning(|email| {
            if email == "user9@test.com" {
                Ok(Some(user(9, None)))
            } else {
                Ok(None)
            }
        });
        repo.expect_update().returning(|u| Ok(u.clone()));

        let service = UserService::new(Arc::new(repo));

        let taken = UserChanges { email: Some("user9@test.com".to_string()), ..Default::default() };
        assert!(matches!(
            service.update(&staff(), 5, taken).await,
            Err(DomainError::EmailAlreadyExists(_))
        ));

        let changes = UserChanges {
            password: Some("newpass".to_string()),
            surname: Some("Changed".to_string()),
            ..Default::default()
        };
        let updated = service.update(&staff(), 5, changes).await.unwrap();
        assert_eq!(updated.surname, "Changed");
        assert!(PasswordService::verify("newpass", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok((id == 5).then(|| user(id, None))));
        repo.expect_delete().returning(|id| Ok(id == 5));

        let service = UserService::new(Arc::new(repo));
        assert!(service.delete(&staff(), 5).await.is_ok());
        assert!(matches!(
            service.delete(&staff(), 6).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(&staff(), staff().user_id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete(&regular(Some(1)), 5).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_only_superusers_modify_superusers() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut target = user(id, None);
            target.is_staff = true;
            target.is_superuser = true;
            Ok(Some(target))
        });
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update().times(1).returning(|u| Ok(u.clone()));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = UserService::new(Arc::new(repo));
        let reset = || UserChanges { password: Some("reset".to_string()), ..Default::default() };

        assert!(matches!(
            service.update(&staff(), 10, reset()).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete(&staff(), 10).await,
            Err(DomainError::Forbidden(_))
        ));

        let root = Principal { user_id: 3, factory_id: None, is_staff: true, is_superuser: true };
        assert!(service.update(&root, 10, reset()).await.is_ok());
        assert!(service.delete(&root, 10).await.is_ok());
    }
}
