// ============================================================================
// Factory Infrastructure - PostgreSQL User Repository
// File: crates/factory-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use factory_core::domain::{NewUser, User};
use factory_core::error::DomainError;
use factory_core::repositories::UserRepository;
use factory_shared::utils::mask_email;
use factory_shared::EntityId;

use super::{database_error, violation, Violation};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub surname: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub factory_id: Option<i64>,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            surname: row.surname,
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            factory_id: row.factory_id,
            date_joined: row.date_joined,
            last_login: row.last_login,
        }
    }
}

/// Maps constraint failures of an insert or update of `email`/`factory_id`.
pub(crate) fn user_write_error(
    action: &str,
    email: &str,
    factory_id: Option<EntityId>,
    e: sqlx::Error,
) -> DomainError {
    match violation(&e) {
        Some(Violation::Unique) => DomainError::EmailAlreadyExists(email.to_string()),
        Some(Violation::ForeignKey) => DomainError::ValidationError(format!(
            "factory: {} does not exist",
            factory_id.unwrap_or_default()
        )),
        None => database_error(action, e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, email, password_hash, name, surname,
                is_active, is_staff, is_superuser, factory_id,
                date_joined, last_login
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding user by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, email, password_hash, name, surname,
                is_active, is_staff, is_superuser, factory_id,
                date_joined, last_login
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding user by email", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self, factory_id: Option<EntityId>) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, email, password_hash, name, surname,
                is_active, is_staff, is_superuser, factory_id,
                date_joined, last_login
            FROM users
            WHERE $1::BIGINT IS NULL OR factory_id = $1
            ORDER BY id
            "#,
        )
        .bind(factory_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing users", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        info!("Creating user with email: {}", mask_email(&user.email));

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (
                email, password_hash, name, surname,
                is_active, is_staff, is_superuser, factory_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, email, password_hash, name, surname,
                is_active, is_staff, is_superuser, factory_id,
                date_joined, last_login
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.factory_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_write_error("creating user", &user.email, user.factory_id, e))?;

        info!("User created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET
                email = $2,
                password_hash = $3,
                name = $4,
                surname = $5,
                is_active = $6,
                is_staff = $7,
                is_superuser = $8,
                factory_id = $9
            WHERE id = $1
            RETURNING
                id, email, password_hash, name, surname,
                is_active, is_staff, is_superuser, factory_id,
                date_joined, last_login
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.factory_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| user_write_error("updating user", &user.email, user.factory_id, e))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("User", user.id))
    }

    async fn record_login(&self, id: EntityId) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("recording login", e))?;
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
