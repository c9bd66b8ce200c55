use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

string_enum! {
    /// Approval state of a single line in a request.
    ItemInRequestStatus, "Status" { Pending, Approved, Declined }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ItemInRequest {
    pub id: Uuid,
    pub request_id: Uuid,
    pub shop_item_id: Uuid,
    pub quantity: i32,
    pub status: ItemInRequestStatus,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItemInRequest {
    pub request_id: Uuid,
    pub shop_item_id: Uuid,
    pub quantity: i32,
    pub organization_id: String,
}

/// A line as submitted by the requester, before the request exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLine {
    pub shop_item_id: Uuid,
    pub quantity: i32,
}

impl NewItemInRequest {
    pub fn for_request(request_id: Uuid, line: &RequestLine, organization_id: &str) -> Self {
        Self {
            request_id,
            shop_item_id: line.shop_item_id,
            quantity: line.quantity,
            organization_id: organization_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemInRequestUpdate {
    pub id: Uuid,
    pub quantity: Option<i32>,
    pub status: Option<ItemInRequestStatus>,
}

impl Validate for NewItemInRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .positive("quantity", "Quantity", self.quantity)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

impl Validate for RequestLine {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .positive("quantity", "Quantity", self.quantity)
            .finish()
    }
}

impl Validate for ItemInRequestUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(quantity) = self.quantity {
            v.positive("quantity", "Quantity", quantity);
        }
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_must_be_positive() {
        let err = NewItemInRequest {
            request_id: Uuid::new_v4(),
            shop_item_id: Uuid::new_v4(),
            quantity: 0,
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message_for("quantity"), Some("Quantity must be at least 1"));
    }

    #[test]
    fn test_status_names() {
        let names: Vec<_> = ItemInRequestStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Pending", "Approved", "Declined"]);
    }
}
