use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{EquipmentRequest, NewRequest, OrgId, RequestStatus, RequestUpdate, UserId};
use crate::validation::Validated;

const ENTITY: &str = "Request";
const COLUMNS: &str = "id, owner_id, status, message, organization_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Inserts a request in the `Open` state.
    async fn create_request(&self, payload: Validated<NewRequest>) -> AppResult<EquipmentRequest>;

    async fn get_request_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<EquipmentRequest>;

    async fn get_requests_by_owner(
        &self,
        org: &OrgId,
        owner: &UserId,
    ) -> AppResult<Vec<EquipmentRequest>>;

    async fn get_all_requests_in_organization(
        &self,
        org: &OrgId,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<EquipmentRequest>>;

    async fn update_request(
        &self,
        org: &OrgId,
        payload: Validated<RequestUpdate>,
    ) -> AppResult<EquipmentRequest>;

    /// Deletes the request together with its line items.
    async fn delete_request(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgRequestRepository {
    pool: PgPool,
}

impl PgRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create_request(&self, payload: Validated<NewRequest>) -> AppResult<EquipmentRequest> {
        let sql = format!(
            "INSERT INTO requests (owner_id, status, message, organization_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, EquipmentRequest>(&sql)
            .bind(&payload.owner_id)
            .bind(RequestStatus::Open)
            .bind(payload.message.as_deref())
            .bind(&payload.organization_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))
    }

    async fn get_request_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<EquipmentRequest> {
        let sql = format!(
            "SELECT {} FROM requests WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, EquipmentRequest>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_requests_by_owner(
        &self,
        org: &OrgId,
        owner: &UserId,
    ) -> AppResult<Vec<EquipmentRequest>> {
        let sql = format!(
            "SELECT {} FROM requests WHERE organization_id = $1 AND owner_id = $2 \
             ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, EquipmentRequest>(&sql)
            .bind(org.as_str())
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_all_requests_in_organization(
        &self,
        org: &OrgId,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<EquipmentRequest>> {
        let sql = format!(
            "SELECT {} FROM requests WHERE organization_id = $1 \
             AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, EquipmentRequest>(&sql)
            .bind(org.as_str())
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_request(
        &self,
        org: &OrgId,
        payload: Validated<RequestUpdate>,
    ) -> AppResult<EquipmentRequest> {
        let sql = format!(
            "UPDATE requests SET \
             status = COALESCE($3, status), \
             message = CASE WHEN $4::text IS NULL THEN message ELSE NULLIF($4, '') END, \
             updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, EquipmentRequest>(&sql)
            .bind(payload.id)
            .bind(org.as_str())
            .bind(payload.status)
            .bind(payload.message.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn delete_request(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected =
            sqlx::query("DELETE FROM requests WHERE id = $1 AND organization_id = $2")
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
