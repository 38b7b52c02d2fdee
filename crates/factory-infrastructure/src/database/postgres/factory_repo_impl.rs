// ============================================================================
// Factory Infrastructure - PostgreSQL Factory Repository
// File: crates/factory-infrastructure/src/database/postgres/factory_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use factory_core::domain::{Factory, NewFactory, NewUser, User};
use factory_core::error::DomainError;
use factory_core::repositories::FactoryRepository;
use factory_shared::EntityId;

use super::database_error;
use super::user_repo_impl::{user_write_error, UserRow};

pub struct PgFactoryRepository {
    pool: PgPool,
}

impl PgFactoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FactoryRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<FactoryRow> for Factory {
    fn from(row: FactoryRow) -> Self {
        Factory {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            country: row.country,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FactoryRepository for PgFactoryRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Factory>, DomainError> {
        let row: Option<FactoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, city, country, owner_id, created_at
            FROM factories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding factory by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self) -> Result<Vec<Factory>, DomainError> {
        let rows: Vec<FactoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, city, country, owner_id, created_at
            FROM factories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing factories", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_with_owner(
        &self,
        factory: &NewFactory,
        owner: &NewUser,
    ) -> Result<(Factory, User), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting transaction", e))?;

        let created: FactoryRow = sqlx::query_as(
            r#"
            INSERT INTO factories (name, address, city, country)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address, city, country, owner_id, created_at
            "#,
        )
        .bind(&factory.name)
        .bind(&factory.address)
        .bind(&factory.city)
        .bind(&factory.country)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| database_error("creating factory", e))?;

        let user: UserRow = sqlx::query_as(
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
        .bind(&owner.email)
        .bind(&owner.password_hash)
        .bind(&owner.name)
        .bind(&owner.surname)
        .bind(owner.is_active)
        .bind(owner.is_staff)
        .bind(owner.is_superuser)
        .bind(created.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| user_write_error("creating factory owner", &owner.email, Some(created.id), e))?;

        let linked: FactoryRow = sqlx::query_as(
            r#"
            UPDATE factories
            SET owner_id = $2
            WHERE id = $1
            RETURNING id, name, address, city, country, owner_id, created_at
            "#,
        )
        .bind(created.id)
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| database_error("linking factory owner", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("committing factory creation", e))?;

        info!("Factory created successfully: {} (owner {})", linked.id, user.id);
        Ok((linked.into(), user.into()))
    }

    async fn update(&self, factory: &Factory) -> Result<Factory, DomainError> {
        let row: Option<FactoryRow> = sqlx::query_as(
            r#"
            UPDATE factories
            SET name = $2, address = $3, city = $4, country = $5
            WHERE id = $1
            RETURNING id, name, address, city, country, owner_id, created_at
            "#,
        )
        .bind(factory.id)
        .bind(&factory.name)
        .bind(&factory.address)
        .bind(&factory.city)
        .bind(&factory.country)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("updating factory", e))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("Factory", factory.id))
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        // Equipment and properties cascade, users.factory_id is set to NULL.
        let result = sqlx::query("DELETE FROM factories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting factory", e))?;

        Ok(result.rows_affected() > 0)
    }
}
