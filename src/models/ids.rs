use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the random part shared by identity provider ids.
const ID_BODY_LEN: usize = 27;

static ID_BODY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("must be exactly {expected} characters long")]
    InvalidLength { expected: usize },
    #[error("must start with \"{prefix}\"")]
    MissingPrefix { prefix: &'static str },
    #[error("must contain only letters and digits after \"{prefix}\"")]
    InvalidCharacters { prefix: &'static str },
}

fn check(value: &str, prefix: &'static str) -> Result<(), IdError> {
    let expected = prefix.len() + ID_BODY_LEN;
    if value.chars().count() != expected {
        return Err(IdError::InvalidLength { expected });
    }
    let body = value
        .strip_prefix(prefix)
        .ok_or(IdError::MissingPrefix { prefix })?;
    if !ID_BODY.is_match(body) {
        return Err(IdError::InvalidCharacters { prefix });
    }
    Ok(())
}

/// Tenant identifier issued by the identity provider (`org_` + 27 chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgId(String);

impl OrgId {
    pub const PREFIX: &'static str = "org_";

    pub fn parse(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        check(&value, Self::PREFIX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User identifier issued by the identity provider (`user_` + 27 chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub const PREFIX: &'static str = "user_";

    pub fn parse(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        check(&value, Self::PREFIX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_impls!(OrgId);
string_id_impls!(UserId);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_ids() {
        let org = OrgId::parse("org_2abcdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(org.as_str().len(), 31);
        let user = UserId::parse("user_2abcdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(user.as_str().len(), 32);
    }

    #[rstest]
    #[case("org_short", IdError::InvalidLength { expected: 31 })]
    #[case("abc_2abcdefghijklmnopqrstuvwxyz", IdError::MissingPrefix { prefix: "org_" })]
    #[case("org_2abcdefghijklmnopqrstuvwx-z", IdError::InvalidCharacters { prefix: "org_" })]
    #[case("", IdError::InvalidLength { expected: 31 })]
    fn test_invalid_org_ids(#[case] value: &str, #[case] expected: IdError) {
        assert_eq!(OrgId::parse(value).unwrap_err(), expected);
    }

    #[rstest]
    #[case("user_2abc", IdError::InvalidLength { expected: 32 })]
    #[case("org_22abcdefghijklmnopqrstuvwxyz", IdError::MissingPrefix { prefix: "user_" })]
    #[case("org_2abcdefghijklmnopqrstuvwxyz", IdError::InvalidLength { expected: 32 })]
    fn test_invalid_user_ids(#[case] value: &str, #[case] expected: IdError) {
        assert_eq!(UserId::parse(value).unwrap_err(), expected);
    }

    #[test]
    fn test_serde_rejects_malformed_ids() {
        let parsed: Result<OrgId, _> = serde_json::from_str("\"org_nope\"");
        assert!(parsed.is_err());
        let parsed: OrgId = serde_json::from_str("\"org_2abcdefghijklmnopqrstuvwxyz\"").unwrap();
        assert_eq!(parsed.to_string(), "org_2abcdefghijklmnopqrstuvwxyz");
    }
}
