use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

string_enum! {
    /// Lifecycle of an employee's equipment request.
    RequestStatus, "Status" { Open, Accepted, Declined, Closed }
}

/// An employee's equipment ask. Line items live in `ItemInRequest`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EquipmentRequest {
    pub id: Uuid,
    pub owner_id: String,
    pub status: RequestStatus,
    pub message: Option<String>,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub owner_id: String,
    pub message: Option<String>,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestUpdate {
    pub id: Uuid,
    pub status: Option<RequestStatus>,
    pub message: Option<String>,
}

/// Payload of the close action. `status` must be the literal closed value.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseRequest {
    pub id: Uuid,
    pub status: String,
}

impl Validate for NewRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .user_id("owner_id", "Owner ID", &self.owner_id)
            .optional_text("message", "Message", self.message.as_deref(), 0, 2000)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

impl Validate for RequestUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("message", "Message", self.message.as_deref(), 0, 2000)
            .finish()
    }
}

impl Validate for CloseRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if self.status != RequestStatus::Closed.as_str() {
            v.add("status", "Status must be Closed");
        }
        v.finish()
    }
}

impl CloseRequest {
    /// The update this close action performs.
    pub fn as_update(&self) -> RequestUpdate {
        RequestUpdate {
            id: self.id,
            status: Some(RequestStatus::Closed),
            message: None,
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
    #[case("Declined", false)]
    #[case("closed", false)]
    #[case("", false)]
    fn test_close_only_accepts_closed_literal(#[case] status: &str, #[case] ok: bool) {
        let close = CloseRequest {
            id: Uuid::new_v4(),
            status: status.to_string(),
        };
        assert_eq!(close.validate().is_ok(), ok);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Accepted".parse::<RequestStatus>(), Ok(RequestStatus::Accepted));
        let err = "Pending".parse::<RequestStatus>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be one of: Open, Accepted, Declined, Closed"
        );
    }

    #[test]
    fn test_new_request_requires_owner() {
        let err = NewRequest {
            owner_id: String::new(),
            message: None,
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
        }
        .validate()
        .unwrap_err();
        assert!(err.message_for("owner_id").is_some());
    }
}
