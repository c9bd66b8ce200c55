use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Inventory, InventoryUpdate, NewInventory, OrgId, UserId};
use crate::validation::Validated;

const ENTITY: &str = "Inventory";
const COLUMNS: &str =
    "id, shop_item_id, owner_id, serial_number, notes, organization_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create_inventory(&self, payload: Validated<NewInventory>) -> AppResult<Inventory>;

    async fn get_inventory_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<Inventory>;

    async fn get_inventory_by_owner(&self, org: &OrgId, owner: &UserId)
        -> AppResult<Vec<Inventory>>;

    async fn get_all_inventory_in_organization(&self, org: &OrgId) -> AppResult<Vec<Inventory>>;

    async fn update_inventory(
        &self,
        org: &OrgId,
        payload: Validated<InventoryUpdate>,
    ) -> AppResult<Inventory>;

    async fn delete_inventory(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn create_inventory(&self, payload: Validated<NewInventory>) -> AppResult<Inventory> {
        let sql = format!(
            "INSERT INTO inventory (shop_item_id, owner_id, serial_number, notes, organization_id) \
             SELECT s.id, $2, $3, $4, s.organization_id FROM shop_items s \
             WHERE s.id = $1 AND s.organization_id = $5 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Inventory>(&sql)
            .bind(payload.shop_item_id)
            .bind(&payload.owner_id)
            .bind(payload.serial_number.as_deref())
            .bind(payload.notes.as_deref())
            .bind(&payload.organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found("Shop item"))
    }

    async fn get_inventory_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<Inventory> {
        let sql = format!(
            "SELECT {} FROM inventory WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, Inventory>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_inventory_by_owner(
        &self,
        org: &OrgId,
        owner: &UserId,
    ) -> AppResult<Vec<Inventory>> {
        let sql = format!(
            "SELECT {} FROM inventory WHERE organization_id = $1 AND owner_id = $2 \
             ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, Inventory>(&sql)
            .bind(org.as_str())
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_all_inventory_in_organization(&self, org: &OrgId) -> AppResult<Vec<Inventory>> {
        let sql = format!(
            "SELECT {} FROM inventory WHERE organization_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, Inventory>(&sql)
            .bind(org.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_inventory(
        &self,
        org: &OrgId,
        payload: Validated<InventoryUpdate>,
    ) -> AppResult<Inventory> {
        let sql = format!(
            "UPDATE inventory SET \
             shop_item_id = COALESCE($3, shop_item_id), \
             owner_id = COALESCE($4, owner_id), \
             serial_number = CASE WHEN $5::text IS NULL THEN serial_number ELSE NULLIF($5, '') END, \
             notes = CASE WHEN $6::text IS NULL THEN notes ELSE NULLIF($6, '') END, \
             updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             AND ($3::uuid IS NULL OR EXISTS ( \
                 SELECT 1 FROM shop_items s WHERE s.id = $3 AND s.organization_id = $2)) \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Inventory>(&sql)
            .bind(payload.id)
            .bind(org.as_str())
            .bind(payload.shop_item_id)
            .bind(payload.owner_id.as_deref())
            .bind(payload.serial_number.as_deref())
            .bind(payload.notes.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn delete_inventory(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected =
            sqlx::query("DELETE FROM inventory WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(org.as_str())
                .execute(&self.pool)
                .await?
                .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found(ENTITY));
        }
        Ok(())
    }
}
