//! Newtype IDs for type-safe entity references.
//!
//! Backend identifiers are opaque: depending on the table they arrive either
//! as JSON integers or as strings (UUIDs). [`RawId`] keeps whichever form the
//! backend sent so that ids round-trip unchanged, and the `define_id!` macro
//! wraps it in per-entity newtypes that cannot be mixed up.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
    /// The input is `.` or `..`, which a URL path would resolve away.
    #[error("id cannot be a dot segment: {0}")]
    DotSegment(String),
    /// The JSON value is neither an integer nor a string.
    #[error("id must be an integer or a string, got {0}")]
    UnsupportedType(&'static str),
}

/// An opaque identifier exactly as the backend sent it.
///
/// Integer ids order numerically, string ids lexicographically, and every
/// integer id orders before every string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric primary key.
    Int(i64),
    /// Textual key (UUID or slug).
    Text(String),
}

impl RawId {
    /// Parse an id from a user-supplied string (e.g. a CLI argument).
    ///
    /// Strings that look like integers become [`RawId::Int`].
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] for blank input and
    /// [`IdError::DotSegment`] for `.` or `..`.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if is_dot_segment(trimmed) {
            return Err(IdError::DotSegment(trimmed.to_owned()));
        }
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Int))
    }

    /// Read an id out of an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error for empty strings, non-integral numbers, and any
    /// other JSON type.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, IdError> {
        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or(IdError::UnsupportedType("non-integral number")),
            serde_json::Value::String(s) => Self::parse(s),
            serde_json::Value::Null => Err(IdError::UnsupportedType("null")),
            serde_json::Value::Bool(_) => Err(IdError::UnsupportedType("bool")),
            serde_json::Value::Array(_) => Err(IdError::UnsupportedType("array")),
            serde_json::Value::Object(_) => Err(IdError::UnsupportedType("object")),
        }
    }
}

/// Whether `s` is a path segment that URL resolution would collapse.
#[must_use]
pub fn is_dot_segment(s: &str) -> bool {
    matches!(s, "." | "..")
}

impl Ord for RawId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Int(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for RawId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for RawId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`RawId`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_raw()`, `from_json()`
/// - `Display`, `FromStr`, and `From<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use orderdesk_core::define_id;
/// define_id!(TableId);
/// define_id!(CourierId);
///
/// let table_id = TableId::from(1);
/// let courier_id: CourierId = "c-7".parse().unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: TableId = courier_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::RawId);

        impl $name {
            /// Wrap a raw backend id.
            #[must_use]
            pub const fn new(id: $crate::RawId) -> Self {
                Self(id)
            }

            /// Get the underlying raw id.
            #[must_use]
            pub const fn as_raw(&self) -> &$crate::RawId {
                &self.0
            }

            /// Read the id out of a JSON value.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is not an integer or non-empty string.
            pub fn from_json(value: &::serde_json::Value) -> Result<Self, $crate::IdError> {
                $crate::RawId::from_json(value).map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::RawId::parse(s).map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self($crate::RawId::Int(id))
            }
        }
    };
}

// Define standard entity IDs
define_id!(CategoryId);
define_id!(StoreId);
define_id!(MenuItemId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_and_text() {
        assert_eq!(RawId::parse("42").unwrap(), RawId::Int(42));
        assert_eq!(
            RawId::parse(" 7f3c-aa ").unwrap(),
            RawId::Text("7f3c-aa".to_string())
        );
        assert_eq!(RawId::parse("  "), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_dot_segments() {
        assert_eq!(
            RawId::parse("."),
            Err(IdError::DotSegment(".".to_string()))
        );
        assert_eq!(
            RawId::parse(" .. "),
            Err(IdError::DotSegment("..".to_string()))
        );
        assert!("..".parse::<StoreId>().is_err());
        assert_eq!(RawId::parse("...").unwrap(), RawId::Text("...".to_string()));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            RawId::from_json(&serde_json::json!(12)).unwrap(),
            RawId::Int(12)
        );
        assert_eq!(
            RawId::from_json(&serde_json::json!("abc")).unwrap(),
            RawId::Text("abc".to_string())
        );
        assert!(RawId::from_json(&serde_json::json!(1.5)).is_err());
        assert!(RawId::from_json(&serde_json::Value::Null).is_err());
        assert!(RawId::from_json(&serde_json::json!("")).is_err());
    }

    #[test]
    fn test_ordering_is_numeric_for_integers() {
        assert!(OrderId::from(10) > OrderId::from(9));
        let text: OrderId = "a".parse().unwrap();
        assert!(text > OrderId::from(i64::MAX));
    }

    #[test]
    fn test_serde_preserves_wire_form() {
        let numeric: StoreId = serde_json::from_str("5").unwrap();
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "5");

        let textual: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(serde_json::to_string(&textual).unwrap(), "\"u-1\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderId::from(17).to_string(), "17");
        let id: CategoryId = "veg".parse().unwrap();
        assert_eq!(format!("{id}"), "veg");
    }
}
