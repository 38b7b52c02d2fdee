//! User domain entity

use std::fmt;

use chrono::{DateTime, Utc};
use validator::Validate;

use factory_shared::utils::normalize_email;
use factory_shared::EntityId;

/// Identity record. The email is the sole login key.
#[derive(Clone, PartialEq, Validate)]
pub struct User {
    pub id: EntityId,

    #[validate(email(message = "Enter a valid email address"), length(max = 255, message = "Email too long"))]
    pub email: String,

    /// Argon2 PHC string, never part of any response
    pub password_hash: String,

    #[validate(length(max = 255, message = "Name too long"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Surname is required and must be at most 255 characters"))]
    pub surname: String,

    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub factory_id: Option<EntityId>,

    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    pub fn apply(&mut self, changes: UserChanges, password_hash: Option<String>) {
        if let Some(email) = changes.email {
            self.email = normalize_email(&email);
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(surname) = changes.surname {
            self.surname = surname;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        if let Some(is_staff) = changes.is_staff {
            self.is_staff = is_staff;
        }
        if let Some(is_superuser) = changes.is_superuser {
            self.is_superuser = is_superuser;
        }
        if let Some(factory_id) = changes.factory_id {
            self.factory_id = factory_id;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("is_active", &self.is_active)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .field("factory_id", &self.factory_id)
            .finish()
    }
}

/// Input of the create-user operation, password still in clear text.
#[derive(Clone, Validate)]
pub struct CreateUser {
    #[validate(
        length(min = 1, max = 255, message = "Email is required and must be at most 255 characters"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(max = 255, message = "Name too long"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Surname is required and must be at most 255 characters"))]
    pub surname: String,

    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub factory_id: Option<EntityId>,
}

impl CreateUser {
    /// Regular, active user without a factory.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        surname: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
            surname: surname.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            factory_id: None,
        }
    }
}

/// Row to insert; produced from [`CreateUser`] once the password is hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub surname: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub factory_id: Option<EntityId>,
}

impl NewUser {
    pub fn from_input(input: CreateUser, password_hash: String) -> Self {
        Self {
            email: normalize_email(&input.email),
            password_hash,
            name: input.name,
            surname: input.surname,
            is_active: input.is_active,
            is_staff: input.is_staff,
            is_superuser: input.is_superuser,
            factory_id: input.factory_id,
        }
    }
}

/// Partial update. `None` leaves a field untouched; the nested option of
/// `name` and `factory_id` allows clearing them.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<Option<String>>,
    pub surname: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub factory_id: Option<Option<EntityId>>,
}
