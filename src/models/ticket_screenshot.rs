use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationErrors, Validator};

pub const MAX_SCREENSHOT_BYTES: usize = 8 * 1024 * 1024;
pub const MAX_SCREENSHOTS_PER_TICKET: i64 = 4;
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TicketScreenshot {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata row written after the bytes are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicketScreenshot {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub organization_id: String,
}

/// An image received from a client, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotUpload {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Validate for ScreenshotUpload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if !ACCEPTED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            v.add("content_type", "Only .jpg and .png files are accepted");
        }
        if self.data.is_empty() {
            v.add("data", "Image must not be empty");
        } else if self.data.len() >= MAX_SCREENSHOT_BYTES {
            v.add("data", "Max image size is 8MB");
        }
        v.finish()
    }
}

impl Validate for NewTicketScreenshot {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if !ACCEPTED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            v.add("content_type", "Only .jpg and .png files are accepted");
        }
        v.text("storage_key", "Storage key", &self.storage_key, 1, 1024)
            .org_id("organization_id", &self.organization_id)
            .finish()
    }
}

pub fn too_many_screenshots() -> ValidationErrors {
    ValidationErrors::single(
        "screenshots",
        format!(
            "A ticket can have at most {} screenshots",
            MAX_SCREENSHOTS_PER_TICKET
        ),
    )
}

/// Object key for a screenshot: `{org}/tickets/{ticket}/{screenshot}`.
pub fn screenshot_storage_key(organization_id: &str, ticket_id: Uuid, id: Uuid) -> String {
    format!("{}/tickets/{}/{}", organization_id, ticket_id, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/png", 1024, None, None)]
    #[case("image/jpeg", MAX_SCREENSHOT_BYTES - 1, None, None)]
    #[case("image/png", MAX_SCREENSHOT_BYTES, None, Some("Max image size is 8MB"))]
    #[case("image/gif", 10, Some("Only .jpg and .png files are accepted"), None)]
    #[case("application/pdf", 0, Some("Only .jpg and .png files are accepted"), Some("Image must not be empty"))]
    fn test_upload_rules(
        #[case] content_type: &str,
        #[case] size: usize,
        #[case] type_error: Option<&str>,
        #[case] size_error: Option<&str>,
    ) {
        let upload = ScreenshotUpload {
            content_type: content_type.to_string(),
            data: vec![0u8; size],
        };
        let result = upload.validate();
        let err = result.as_ref().err();
        assert_eq!(err.and_then(|e| e.message_for("content_type")), type_error);
        assert_eq!(err.and_then(|e| e.message_for("data")), size_error);
    }

    #[test]
    fn test_storage_key_layout() {
        let ticket = Uuid::nil();
        let id = Uuid::nil();
        assert_eq!(
            screenshot_storage_key("org_2abcdefghijklmnopqrstuvwxyz", ticket, id),
            "org_2abcdefghijklmnopqrstuvwxyz/tickets/00000000-0000-0000-0000-000000000000/00000000-0000-0000-0000-000000000000"
        );
    }
}
