// ============================================================================
// Factory Infrastructure - PostgreSQL Equipment Repository
// File: crates/factory-infrastructure/src/database/postgres/equipment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::info;

use factory_core::domain::{Equipment, NewEquipment};
use factory_core::error::DomainError;
use factory_core::repositories::EquipmentRepository;
use factory_shared::EntityId;

use super::{database_error, violation, Violation};

pub struct PgEquipmentRepository {
    pool: PgPool,
}

impl PgEquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EquipmentRow {
    pub id: i64,
    pub factory_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub date: NaiveDate,
    pub status: bool,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Equipment {
            id: row.id,
            factory_id: row.factory_id,
            name: row.name,
            description: row.description,
            price: row.price,
            date: row.date,
            status: row.status,
        }
    }
}

fn write_error(action: &str, name: &str, factory_id: EntityId, e: sqlx::Error) -> DomainError {
    match violation(&e) {
        Some(Violation::Unique) => DomainError::NameAlreadyExists {
            entity: "Equipment",
            name: name.to_string(),
        },
        Some(Violation::ForeignKey) => {
            DomainError::ValidationError(format!("factory: {} does not exist", factory_id))
        }
        None => database_error(action, e),
    }
}

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Equipment>, DomainError> {
        let row: Option<EquipmentRow> = sqlx::query_as(
            r#"
            SELECT id, factory_id, name, description, price, date, status
            FROM equipment
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding equipment by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_factory(&self, factory_id: EntityId) -> Result<Vec<Equipment>, DomainError> {
        let rows: Vec<EquipmentRow> = sqlx::query_as(
            r#"
            SELECT id, factory_id, name, description, price, date, status
            FROM equipment
            WHERE factory_id = $1
            ORDER BY id
            "#,
        )
        .bind(factory_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing equipment", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, factory_id: EntityId, equipment: &NewEquipment) -> Result<Equipment, DomainError> {
        let row: EquipmentRow = sqlx::query_as(
            r#"
            INSERT INTO equipment (factory_id, name, description, price, date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, factory_id, name, description, price, date, status
            "#,
        )
        .bind(factory_id)
        .bind(&equipment.name)
        .bind(&equipment.description)
        .bind(equipment.price)
        .bind(equipment.date)
        .bind(equipment.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("creating equipment", &equipment.name, factory_id, e))?;

        info!("Equipment created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, equipment: &Equipment) -> Result<Equipment, DomainError> {
        let row: Option<EquipmentRow> = sqlx::query_as(
            r#"
            UPDATE equipment
            SET name = $2, description = $3, price = $4, date = $5, status = $6
            WHERE id = $1
            RETURNING id, factory_id, name, description, price, date, status
            "#,
        )
        .bind(equipment.id)
        .bind(&equipment.name)
        .bind(&equipment.description)
        .bind(equipment.price)
        .bind(equipment.date)
        .bind(equipment.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("updating equipment", &equipment.name, equipment.factory_id, e))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("Equipment", equipment.id))
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting equipment", e))?;

        Ok(result.rows_affected() > 0)
    }
}
