//! Pure data structures managed by the resource actors.
//!
//! Identifiers are `u32` newtypes issued by their actor. They display with a
//! resource prefix (`order_7`) and parse from either that form or the bare
//! number, so both `/api/orders/order_7` and `/api/orders/7` resolve.

pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;

/// A path or header value that is not a valid identifier for its resource.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {resource} id: {value:?}")]
pub struct IdParseError {
    pub resource: &'static str,
    pub value: String,
}

/// Declares a typed `u32` identifier with its display prefix.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s
                    .strip_prefix(concat!($prefix, "_"))
                    .unwrap_or(s);
                digits
                    .parse::<u32>()
                    .map(Self)
                    .map_err(|_| $crate::model::IdParseError {
                        resource: $prefix,
                        value: s.to_string(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Number(u32),
                    Text(String),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Number(n) => Ok(Self(n)),
                    Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

pub(crate) use resource_id;
