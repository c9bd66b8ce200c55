use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ItemInRequest, ItemInRequestStatus, ItemInRequestUpdate, NewItemInRequest, OrgId};
use crate::validation::Validated;

const ENTITY: &str = "Item in request";
const COLUMNS: &str =
    "id, request_id, shop_item_id, quantity, status, organization_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemInRequestRepository: Send + Sync {
    /// Inserts a `Pending` line. Both the request and the shop item must
    /// belong to the payload's organization.
    async fn create_item_in_request(
        &self,
        payload: Validated<NewItemInRequest>,
    ) -> AppResult<ItemInRequest>;

    async fn get_item_in_request_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<ItemInRequest>;

    async fn get_items_in_request(
        &self,
        org: &OrgId,
        request_id: Uuid,
    ) -> AppResult<Vec<ItemInRequest>>;

    async fn update_item_in_request(
        &self,
        org: &OrgId,
        payload: Validated<ItemInRequestUpdate>,
    ) -> AppResult<ItemInRequest>;

    async fn delete_item_in_request(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgItemInRequestRepository {
    pool: PgPool,
}

impl PgItemInRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemInRequestRepository for PgItemInRequestRepository {
    async fn create_item_in_request(
        &self,
        payload: Validated<NewItemInRequest>,
    ) -> AppResult<ItemInRequest> {
        let sql = format!(
            "INSERT INTO items_in_request (request_id, shop_item_id, quantity, status, organization_id) \
             SELECT r.id, s.id, $3, $4, r.organization_id \
             FROM requests r JOIN shop_items s ON s.organization_id = r.organization_id \
             WHERE r.id = $1 AND s.id = $2 AND r.organization_id = $5 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, ItemInRequest>(&sql)
            .bind(payload.request_id)
            .bind(payload.shop_item_id)
            .bind(payload.quantity)
            .bind(ItemInRequestStatus::Pending)
            .bind(&payload.organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::NotFound("Request or shop item not found".to_string()))
    }

    async fn get_item_in_request_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<ItemInRequest> {
        let sql = format!(
            "SELECT {} FROM items_in_request WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, ItemInRequest>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_items_in_request(
        &self,
        org: &OrgId,
        request_id: Uuid,
    ) -> AppResult<Vec<ItemInRequest>> {
        let sql = format!(
            "SELECT {} FROM items_in_request WHERE organization_id = $1 AND request_id = $2 \
             ORDER BY created_at ASC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, ItemInRequest>(&sql)
            .bind(org.as_str())
            .bind(request_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_item_in_request(
        &self,
        org: &OrgId,
        payload: Validated<ItemInRequestUpdate>,
    ) -> AppResult<ItemInRequest> {
        let sql = format!(
            "UPDATE items_in_request SET \
             quantity = COALESCE($3, quantity), \
             status = COALESCE($4, status), \
             updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, ItemInRequest>(&sql)
            .bind(payload.id)
            .bind(org.as_str())
            .bind(payload.quantity)
            .bind(payload.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn delete_item_in_request(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected =
            sqlx::query("DELETE FROM items_in_request WHERE id = $1 AND organization_id = $2")
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
