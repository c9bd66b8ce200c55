//! Payload schemas.
//!
//! Every create/update payload implements [`Validate`]. Repositories only
//! accept [`Validated`] payloads, so a payload the schema rejects cannot
//! reach storage.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{OrgId, UserId};

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field failures of one payload, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message reported for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// A payload that passed its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

pub trait Validate: Sized {
    fn validate(&self) -> Result<(), ValidationErrors>;

    fn validated(self) -> Result<Validated<Self>, ValidationErrors> {
        self.validate()?;
        Ok(Validated(self))
    }
}

fn characters(n: usize) -> &'static str {
    if n == 1 {
        "character"
    } else {
        "characters"
    }
}

/// Accumulates field errors for one payload.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    pub fn text(
        &mut self,
        field: &'static str,
        label: &str,
        value: &str,
        min: usize,
        max: usize,
    ) -> &mut Self {
        let len = value.chars().count();
        if len < min {
            self.add(
                field,
                format!("{} must be at least {} {} long", label, min, characters(min)),
            );
        } else if len > max {
            self.add(
                field,
                format!("{} must be at most {} {} long", label, max, characters(max)),
            );
        }
        self
    }

    pub fn optional_text(
        &mut self,
        field: &'static str,
        label: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) -> &mut Self {
        if let Some(v) = value {
            self.text(field, label, v, min, max);
        }
        self
    }

    /// An empty value is accepted; updates use it to clear the field.
    pub fn url(&mut self, field: &'static str, label: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            if !(v.starts_with("https://") || v.starts_with("http://")) {
                self.add(field, format!("{} must be a valid http(s) URL", label));
            } else if v.chars().count() > 2048 {
                self.add(field, format!("{} must be at most 2048 characters long", label));
            }
        }
        self
    }

    pub fn org_id(&mut self, field: &'static str, value: &str) -> &mut Self {
        if let Err(e) = OrgId::parse(value) {
            self.add(field, format!("Organization ID {}", e));
        }
        self
    }

    pub fn user_id(&mut self, field: &'static str, label: &str, value: &str) -> &mut Self {
        if let Err(e) = UserId::parse(value) {
            self.add(field, format!("{} {}", label, e));
        }
        self
    }

    pub fn optional_user_id(
        &mut self,
        field: &'static str,
        label: &str,
        value: Option<&str>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.user_id(field, label, v);
        }
        self
    }

    pub fn positive(&mut self, field: &'static str, label: &str, value: i32) -> &mut Self {
        if value < 1 {
            self.add(field, format!("{} must be at least 1", label));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::from(std::mem::take(&mut self.errors)))
        }
    }
}

/// Parses a record id received on the wire.
pub fn parse_uuid(field: &'static str, value: &str) -> Result<Uuid, ValidationErrors> {
    if value.is_empty() {
        return Err(ValidationErrors::single(field, format!("{} is required", field)));
    }
    Uuid::parse_str(value)
        .map_err(|_| ValidationErrors::single(field, format!("{} must be a valid UUID", field)))
}

pub fn parse_optional_uuid(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Uuid>, ValidationErrors> {
    value.map(|v| parse_uuid(field, v)).transpose()
}

/// Parses an enumerated field, reporting the accepted values on failure.
pub fn parse_enum<E>(field: &'static str, value: &str) -> Result<E, ValidationErrors>
where
    E: FromStr,
    E::Err: fmt::Display,
{
    value
        .parse::<E>()
        .map_err(|e| ValidationErrors::single(field, e.to_string()))
}

pub fn parse_optional_enum<E>(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<E>, ValidationErrors>
where
    E: FromStr,
    E::Err: fmt::Display,
{
    value.map(|v| parse_enum(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Some("Name must be at least 1 character long"))]
    #[case("Laptops", None)]
    fn test_text_bounds(#[case] value: &str, #[case] expected: Option<&str>) {
        let result = Validator::new().text("name", "Name", value, 1, 255).finish();
        assert_eq!(
            result.err().as_ref().and_then(|e| e.message_for("name")),
            expected
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("https://cdn.example.com/a.png"), None)]
    #[case(Some("ftp://cdn.example.com/a.png"), Some("Image URL must be a valid http(s) URL"))]
    fn test_url_rules(#[case] value: Option<&str>, #[case] expected: Option<&str>) {
        let result = Validator::new().url("image_url", "Image URL", value).finish();
        assert_eq!(
            result.as_ref().err().and_then(|e| e.message_for("image_url")),
            expected
        );
    }

    #[test]
    fn test_text_counts_characters_not_bytes() {
        let value = "é".repeat(255);
        assert!(Validator::new().text("name", "Name", &value, 1, 255).finish().is_ok());
        let too_long = "é".repeat(256);
        let err = Validator::new()
            .text("name", "Name", &too_long, 1, 255)
            .finish()
            .unwrap_err();
        assert_eq!(
            err.message_for("name"),
            Some("Name must be at most 255 characters long")
        );
    }

    #[test]
    fn test_validator_collects_every_field() {
        let err = Validator::new()
            .text("title", "Title", "", 1, 255)
            .positive("quantity", "Quantity", 0)
            .url("image_url", "Image URL", Some("ftp://example.com/a.png"))
            .finish()
            .unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "quantity", "image_url"]);
        assert_eq!(
            err.to_string(),
            "title: Title must be at least 1 character long; \
             quantity: Quantity must be at least 1; \
             image_url: Image URL must be a valid http(s) URL"
        );
    }

    #[test]
    fn test_parse_uuid_requires_value() {
        let err = parse_uuid("id", "").unwrap_err();
        assert_eq!(err.message_for("id"), Some("id is required"));
        let err = parse_uuid("id", "not-a-uuid").unwrap_err();
        assert_eq!(err.message_for("id"), Some("id must be a valid UUID"));
    }
}
