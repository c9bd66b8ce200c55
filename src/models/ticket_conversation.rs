use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

/// One message in a ticket's thread.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TicketConversation {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub author_id: String,
    pub message: String,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTicketConversation {
    pub ticket_id: Uuid,
    pub author_id: String,
    pub message: String,
    pub organization_id: String,
}

impl Validate for NewTicketConversation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("message", "Message", &self.message, 1, 5000)
            .user_id("author_id", "Author ID", &self.author_id)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_rejected() {
        let err = NewTicketConversation {
            ticket_id: Uuid::new_v4(),
            author_id: "user_2abcdefghijklmnopqrstuvwxyz".to_string(),
            message: String::new(),
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.message_for("message"),
            Some("Message must be at least 1 character long")
        );
    }
}
