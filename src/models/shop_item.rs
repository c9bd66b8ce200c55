use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

pub const SHOP_ITEM_DESCRIPTION_MAX: usize = 2000;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ShopItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category_id: Uuid,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShopItem {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category_id: Uuid,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopItemUpdate {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
}

impl Validate for NewShopItem {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("name", "Name", &self.name, 1, 255)
            .text(
                "description",
                "Description",
                &self.description,
                0,
                SHOP_ITEM_DESCRIPTION_MAX,
            )
            .url("image_url", "Image URL", self.image_url.as_deref())
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

impl Validate for ShopItemUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("name", "Name", self.name.as_deref(), 1, 255)
            .optional_text(
                "description",
                "Description",
                self.description.as_deref(),
                0,
                SHOP_ITEM_DESCRIPTION_MAX,
            )
            .url("image_url", "Image URL", self.image_url.as_deref())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item() -> NewShopItem {
        NewShopItem {
            name: "ThinkPad X1".to_string(),
            description: "14 inch business laptop".to_string(),
            image_url: Some("https://cdn.example.com/x1.png".to_string()),
            category_id: Uuid::new_v4(),
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
        }
    }

    #[test]
    fn test_valid_item() {
        assert!(new_item().validate().is_ok());
    }

    #[test]
    fn test_missing_name_and_bad_url_are_both_reported() {
        let item = NewShopItem {
            name: String::new(),
            image_url: Some("cdn.example.com/x1.png".to_string()),
            ..new_item()
        };
        let err = item.validate().unwrap_err();
        assert_eq!(
            err.message_for("name"),
            Some("Name must be at least 1 character long")
        );
        assert_eq!(
            err.message_for("image_url"),
            Some("Image URL must be a valid http(s) URL")
        );
    }

    #[test]
    fn test_update_may_clear_image_url() {
        let update = ShopItemUpdate {
            id: Uuid::new_v4(),
            name: None,
            description: None,
            image_url: Some(String::new()),
            category_id: None,
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_description_limit() {
        let item = NewShopItem {
            description: "x".repeat(SHOP_ITEM_DESCRIPTION_MAX + 1),
            ..new_item()
        };
        assert_eq!(
            item.validate().unwrap_err().message_for("description"),
            Some("Description must be at most 2000 characters long")
        );
    }
}
