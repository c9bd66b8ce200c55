use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewTicket, OrgId, Ticket, TicketStatus, TicketUpdate, UserId};
use crate::validation::Validated;

const ENTITY: &str = "Ticket";
const COLUMNS: &str =
    "id, title, description, status, priority, owner_id, organization_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Inserts a ticket in the `Open` state.
    async fn create_ticket(&self, payload: Validated<NewTicket>) -> AppResult<Ticket>;

    async fn get_ticket_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<Ticket>;

    async fn get_tickets_by_owner(&self, org: &OrgId, owner: &UserId) -> AppResult<Vec<Ticket>>;

    async fn get_all_tickets_in_organization(
        &self,
        org: &OrgId,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>>;

    async fn update_ticket(
        &self,
        org: &OrgId,
        payload: Validated<TicketUpdate>,
    ) -> AppResult<Ticket>;

    /// Deletes the ticket together with its conversation and screenshot rows.
    async fn delete_ticket(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn create_ticket(&self, payload: Validated<NewTicket>) -> AppResult<Ticket> {
        let sql = format!(
            "INSERT INTO tickets (title, description, status, priority, owner_id, organization_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(TicketStatus::Open)
            .bind(payload.priority)
            .bind(&payload.owner_id)
            .bind(&payload.organization_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))
    }

    async fn get_ticket_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<Ticket> {
        let sql = format!(
            "SELECT {} FROM tickets WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_tickets_by_owner(&self, org: &OrgId, owner: &UserId) -> AppResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT {} FROM tickets WHERE organization_id = $1 AND owner_id = $2 \
             ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, Ticket>(&sql)
            .bind(org.as_str())
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_all_tickets_in_organization(
        &self,
        org: &OrgId,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT {} FROM tickets WHERE organization_id = $1 \
             AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, Ticket>(&sql)
            .bind(org.as_str())
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_ticket(
        &self,
        org: &OrgId,
        payload: Validated<TicketUpdate>,
    ) -> AppResult<Ticket> {
        let sql = format!(
            "UPDATE tickets SET \
             title = COALESCE($3, title), \
             description = COALESCE($4, description), \
             status = COALESCE($5, status), \
             priority = COALESCE($6, priority), \
             updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(payload.id)
            .bind(org.as_str())
            .bind(payload.title.as_deref())
            .bind(payload.description.as_deref())
            .bind(payload.status)
            .bind(payload.priority)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn delete_ticket(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected =
            sqlx::query("DELETE FROM tickets WHERE id = $1 AND organization_id = $2")
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
