use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    too_many_screenshots, NewTicketScreenshot, OrgId, TicketScreenshot, MAX_SCREENSHOTS_PER_TICKET,
};
use crate::validation::Validated;

const ENTITY: &str = "Screenshot";
const COLUMNS: &str =
    "id, ticket_id, storage_key, content_type, size_bytes, organization_id, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketScreenshotRepository: Send + Sync {
    async fn create_ticket_screenshot(
        &self,
        payload: Validated<NewTicketScreenshot>,
    ) -> AppResult<TicketScreenshot>;

    async fn get_ticket_screenshot_by_id(
        &self,
        org: &OrgId,
        id: Uuid,
    ) -> AppResult<TicketScreenshot>;

    async fn get_screenshots_for_ticket(
        &self,
        org: &OrgId,
        ticket_id: Uuid,
    ) -> AppResult<Vec<TicketScreenshot>>;

    async fn count_screenshots_for_ticket(&self, org: &OrgId, ticket_id: Uuid) -> AppResult<i64>;

    async fn delete_ticket_screenshot(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgTicketScreenshotRepository {
    pool: PgPool,
}

impl PgTicketScreenshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketScreenshotRepository for PgTicketScreenshotRepository {
    /// Locks the parent ticket row so concurrent uploads are counted one at a
    /// time and the per-ticket cap holds.
    async fn create_ticket_screenshot(
        &self,
        payload: Validated<NewTicketScreenshot>,
    ) -> AppResult<TicketScreenshot> {
        let mut tx = self.pool.begin().await?;

        let ticket: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM tickets WHERE id = $1 AND organization_id = $2 FOR UPDATE",
        )
        .bind(payload.ticket_id)
        .bind(&payload.organization_id)
        .fetch_optional(&mut *tx)
        .await?;
        if ticket.is_none() {
            return Err(AppError::not_found("Ticket"));
        }

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ticket_screenshots WHERE organization_id = $1 AND ticket_id = $2",
        )
        .bind(&payload.organization_id)
        .bind(payload.ticket_id)
        .fetch_one(&mut *tx)
        .await?;
        if count >= MAX_SCREENSHOTS_PER_TICKET {
            return Err(too_many_screenshots().into());
        }

        let sql = format!(
            "INSERT INTO ticket_screenshots \
             (id, ticket_id, storage_key, content_type, size_bytes, organization_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, TicketScreenshot>(&sql)
            .bind(payload.id)
            .bind(payload.ticket_id)
            .bind(&payload.storage_key)
            .bind(&payload.content_type)
            .bind(payload.size_bytes)
            .bind(&payload.organization_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?;

        tx.commit().await?;
        Ok(row)
    }

    async fn get_ticket_screenshot_by_id(
        &self,
        org: &OrgId,
        id: Uuid,
    ) -> AppResult<TicketScreenshot> {
        let sql = format!(
            "SELECT {} FROM ticket_screenshots WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, TicketScreenshot>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_screenshots_for_ticket(
        &self,
        org: &OrgId,
        ticket_id: Uuid,
    ) -> AppResult<Vec<TicketScreenshot>> {
        let sql = format!(
            "SELECT {} FROM ticket_screenshots WHERE organization_id = $1 AND ticket_id = $2 \
             ORDER BY created_at ASC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, TicketScreenshot>(&sql)
            .bind(org.as_str())
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_screenshots_for_ticket(&self, org: &OrgId, ticket_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ticket_screenshots WHERE organization_id = $1 AND ticket_id = $2",
        )
        .bind(org.as_str())
        .bind(ticket_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn delete_ticket_screenshot(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected = sqlx::query(
            "DELETE FROM ticket_screenshots WHERE id = $1 AND organization_id = $2",
        )
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
