use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewTicketConversation, OrgId, TicketConversation};
use crate::validation::Validated;

const ENTITY: &str = "Conversation";
const COLUMNS: &str = "id, ticket_id, author_id, message, organization_id, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketConversationRepository: Send + Sync {
    async fn create_ticket_conversation(
        &self,
        payload: Validated<NewTicketConversation>,
    ) -> AppResult<TicketConversation>;

    async fn get_ticket_conversation_by_id(
        &self,
        org: &OrgId,
        id: Uuid,
    ) -> AppResult<TicketConversation>;

    /// Thread of a ticket, oldest message first.
    async fn get_conversations_for_ticket(
        &self,
        org: &OrgId,
        ticket_id: Uuid,
    ) -> AppResult<Vec<TicketConversation>>;

    async fn delete_ticket_conversation(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgTicketConversationRepository {
    pool: PgPool,
}

impl PgTicketConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketConversationRepository for PgTicketConversationRepository {
    async fn create_ticket_conversation(
        &self,
        payload: Validated<NewTicketConversation>,
    ) -> AppResult<TicketConversation> {
        let sql = format!(
            "INSERT INTO ticket_conversations (ticket_id, author_id, message, organization_id) \
             SELECT t.id, $2, $3, t.organization_id FROM tickets t \
             WHERE t.id = $1 AND t.organization_id = $4 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, TicketConversation>(&sql)
            .bind(payload.ticket_id)
            .bind(&payload.author_id)
            .bind(&payload.message)
            .bind(&payload.organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found("Ticket"))
    }

    async fn get_ticket_conversation_by_id(
        &self,
        org: &OrgId,
        id: Uuid,
    ) -> AppResult<TicketConversation> {
        let sql = format!(
            "SELECT {} FROM ticket_conversations WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, TicketConversation>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_conversations_for_ticket(
        &self,
        org: &OrgId,
        ticket_id: Uuid,
    ) -> AppResult<Vec<TicketConversation>> {
        let sql = format!(
            "SELECT {} FROM ticket_conversations WHERE organization_id = $1 AND ticket_id = $2 \
             ORDER BY created_at ASC",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, TicketConversation>(&sql)
            .bind(org.as_str())
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_ticket_conversation(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected = sqlx::query(
            "DELETE FROM ticket_conversations WHERE id = $1 AND organization_id = $2",
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
