// ============================================================================
// Factory Infrastructure - PostgreSQL Property Repository
// File: crates/factory-infrastructure/src/database/postgres/property_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::info;

use factory_core::domain::{NewProperty, Property};
use factory_core::error::DomainError;
use factory_core::repositories::PropertyRepository;
use factory_shared::EntityId;

use super::{database_error, violation, Violation};

pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PropertyRow {
    pub id: i64,
    pub equipment_id: i64,
    pub name: String,
    pub description: String,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: row.id,
            equipment_id: row.equipment_id,
            name: row.name,
            description: row.description,
        }
    }
}

fn write_error(action: &str, name: &str, equipment_id: EntityId, e: sqlx::Error) -> DomainError {
    match violation(&e) {
        Some(Violation::Unique) => DomainError::NameAlreadyExists {
            entity: "Property",
            name: name.to_string(),
        },
        Some(Violation::ForeignKey) => {
            DomainError::ValidationError(format!("equipment: {} does not exist", equipment_id))
        }
        None => database_error(action, e),
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Property>, DomainError> {
        let row: Option<PropertyRow> = sqlx::query_as(
            "SELECT id, equipment_id, name, description FROM properties WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding property by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_equipment(&self, equipment_id: EntityId) -> Result<Vec<Property>, DomainError> {
        let rows: Vec<PropertyRow> = sqlx::query_as(
            r#"
            SELECT id, equipment_id, name, description
            FROM properties
            WHERE equipment_id = $1
            ORDER BY id
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing properties", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, equipment_id: EntityId, property: &NewProperty) -> Result<Property, DomainError> {
        let row: PropertyRow = sqlx::query_as(
            r#"
            INSERT INTO properties (equipment_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, equipment_id, name, description
            "#,
        )
        .bind(equipment_id)
        .bind(&property.name)
        .bind(&property.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("creating property", &property.name, equipment_id, e))?;

        info!("Property created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, property: &Property) -> Result<Property, DomainError> {
        let row: Option<PropertyRow> = sqlx::query_as(
            r#"
            UPDATE properties
            SET equipment_id = $2, name = $3, description = $4
            WHERE id = $1
            RETURNING id, equipment_id, name, description
            "#,
        )
        .bind(property.id)
        .bind(property.equipment_id)
        .bind(&property.name)
        .bind(&property.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("updating property", &property.name, property.equipment_id, e))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("Property", property.id))
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting property", e))?;

        Ok(result.rows_affected() > 0)
    }
}
