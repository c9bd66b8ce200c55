use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{label} must be one of: {}", .expected.join(", "))]
pub struct ParseEnumError {
    pub label: &'static str,
    pub expected: &'static [&'static str],
}

/// Declares a closed set of statuses. Values are stored in `TEXT` columns
/// and sent on the wire by their variant name.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let raw = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(raw.parse()?)
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    _ => Err($crate::models::ParseEnumError {
                        label: $label,
                        expected: $name::NAMES,
                    }),
                }
            }
        }
    };
}

pub mod ids;
pub mod inventory;
pub mod item_in_request;
pub mod request;
pub mod shop_item;
pub mod shop_item_category;
pub mod ticket;
pub mod ticket_conversation;
pub mod ticket_screenshot;

pub use ids::*;
pub use inventory::*;
pub use item_in_request::*;
pub use request::*;
pub use shop_item::*;
pub use shop_item_category::*;
pub use ticket::*;
pub use ticket_conversation::*;
pub use ticket_screenshot::*;

