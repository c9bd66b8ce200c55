use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

string_enum! {
    TicketStatus, "Status" { Open, InProgress, Closed }
}

string_enum! {
    TicketPriority, "Priority" { Low, Medium, High }
}

impl Default for TicketPriority {
    fn default() -> Self {
        TicketPriority::Medium
    }
}

pub const TICKET_DESCRIPTION_MAX: usize = 5000;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub owner_id: String,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub owner_id: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketUpdate {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

/// Payload of the close action. `status` must be the literal closed value.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseTicket {
    pub id: Uuid,
    pub status: String,
}

impl Validate for NewTicket {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("title", "Title", &self.title, 1, 255)
            .text(
                "description",
                "Description",
                &self.description,
                1,
                TICKET_DESCRIPTION_MAX,
            )
            .user_id("owner_id", "Owner ID", &self.owner_id)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

impl Validate for TicketUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("title", "Title", self.title.as_deref(), 1, 255)
            .optional_text(
                "description",
                "Description",
                self.description.as_deref(),
                1,
                TICKET_DESCRIPTION_MAX,
            )
            .finish()
    }
}

impl Validate for CloseTicket {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if self.status != TicketStatus::Closed.as_str() {
            v.add("status", "Status must be Closed");
        }
        v.finish()
    }
}

impl CloseTicket {
    pub fn as_update(&self) -> TicketUpdate {
        TicketUpdate {
            id: self.id,
            title: None,
            description: None,
            status: Some(TicketStatus::Closed),
            priority: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Closed", true)]
    #[case("Open", false)]
    #[case("InProgress", false)]
    #[case("CLOSED", false)]
    #[case("Resolved", false)]
    fn test_close_ticket_literal(#[case] status: &str, #[case] ok: bool) {
        let close = CloseTicket {
            id: Uuid::new_v4(),
            status: status.to_string(),
        };
        let result = close.validate();
        assert_eq!(result.is_ok(), ok);
        if let Err(e) = result {
            assert_eq!(e.message_for("status"), Some("Status must be Closed"));
        }
    }

    #[test]
    fn test_missing_title_and_description() {
        let err = NewTicket {
            title: String::new(),
            description: String::new(),
            priority: TicketPriority::default(),
            owner_id: "user_2abcdefghijklmnopqrstuvwxyz".to_string(),
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.message_for("title"),
            Some("Title must be at least 1 character long")
        );
        assert_eq!(
            err.message_for("description"),
            Some("Description must be at least 1 character long")
        );
    }

    #[test]
    fn test_close_update_sets_closed() {
        let id = Uuid::new_v4();
        let update = CloseTicket {
            id,
            status: "Closed".to_string(),
        }
        .as_update();
        assert_eq!(update.id, id);
        assert_eq!(update.status, Some(TicketStatus::Closed));
        assert!(update.title.is_none());
    }
}
