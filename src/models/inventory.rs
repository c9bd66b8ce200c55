use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

/// A concrete item instance assigned to an owner.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Inventory {
    pub id: Uuid,
    pub shop_item_id: Uuid,
    pub owner_id: String,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInventory {
    pub shop_item_id: Uuid,
    pub owner_id: String,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryUpdate {
    pub id: Uuid,
    pub shop_item_id: Option<Uuid>,
    pub owner_id: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
}

impl Validate for NewInventory {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .user_id("owner_id", "Owner ID", &self.owner_id)
            .optional_text(
                "serial_number",
                "Serial number",
                self.serial_number.as_deref(),
                0,
                255,
            )
            .optional_text("notes", "Notes", self.notes.as_deref(), 0, 2000)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

impl Validate for InventoryUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_user_id("owner_id", "Owner ID", self.owner_id.as_deref())
            .optional_text(
                "serial_number",
                "Serial number",
                self.serial_number.as_deref(),
                0,
                255,
            )
            .optional_text("notes", "Notes", self.notes.as_deref(), 0, 2000)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user_2abcdefghijklmnopqrstuvwxyz", None)]
    #[case("user_2abc", Some("Owner ID must be exactly 32 characters long"))]
    #[case("usr__2abcdefghijklmnopqrstuvwxyz", Some("Owner ID must start with \"user_\""))]
    fn test_owner_id_format(#[case] owner_id: &str, #[case] expected: Option<&str>) {
        let payload = NewInventory {
            shop_item_id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            serial_number: Some("SN-0042".to_string()),
            notes: None,
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
        };
        let result = payload.validate();
        assert_eq!(
            result.as_ref().err().and_then(|e| e.message_for("owner_id")),
            expected
        );
    }

    #[test]
    fn test_update_reassigning_owner_checks_format() {
        let update = InventoryUpdate {
            id: Uuid::new_v4(),
            shop_item_id: None,
            owner_id: Some("org_2abcdefghijklmnopqrstuvwxyz".to_string()),
            serial_number: None,
            notes: None,
        };
        assert!(update.validate().is_err());
    }
}
