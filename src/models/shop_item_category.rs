use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ShopItemCategory {
    pub id: Uuid,
    pub name: String,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShopItemCategory {
    pub name: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopItemCategoryUpdate {
    pub id: Uuid,
    pub name: Option<String>,
}

impl Validate for NewShopItemCategory {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("name", "Name", &self.name, 1, 255)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

impl Validate for ShopItemCategoryUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("name", "Name", self.name.as_deref(), 1, 255)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORG: &str = "org_2abcdefghijklmnopqrstuvwxyz";

    #[test]
    fn test_empty_name_is_rejected() {
        let err = NewShopItemCategory {
            name: String::new(),
            organization_id: ORG.to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.message_for("name"),
            Some("Name must be at least 1 character long")
        );
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_valid_category() {
        let payload = NewShopItemCategory {
            name: "Laptops".to_string(),
            organization_id: ORG.to_string(),
        };
        assert!(payload.validated().is_ok());
    }

    #[test]
    fn test_malformed_organization_is_rejected() {
        let err = NewShopItemCategory {
            name: "Laptops".to_string(),
            organization_id: "org_123".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.message_for("organization_id"),
            Some("Organization ID must be exactly 31 characters long")
        );
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        let id = Uuid::new_v4();
        assert!(ShopItemCategoryUpdate { id, name: None }.validate().is_ok());
        assert!(ShopItemCategoryUpdate {
            id,
            name: Some(String::new())
        }
        .validate()
        .is_err());
    }
}
