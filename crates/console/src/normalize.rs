//! Shape normalization for backend responses.
//!
//! The backend embeds related records under inconsistent keys: an order's
//! customer may arrive as `user`, as a `users` object, or as the first
//! element of a `users` array. Every relation is read through a
//! [`Relation`], which tries those shapes in a fixed order and ends in the
//! [`Resolved::NotAvailable`] sentinel, so no call site digs through fields itself.
//!
//! This module also unwraps `{data: ...}` envelopes and reads scalar fields
//! (ids, money, timestamps) with the same tolerance.

use chrono::{DateTime, NaiveDateTime, Utc};
use orderdesk_core::{Money, Resolved};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// JSON object type.
pub type Object = Map<String, Value>;

/// Naive timestamp layouts accepted when the backend omits a UTC offset.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

// =============================================================================
// Relations
// =============================================================================

/// Where a denormalized relation was found in a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelationShape<'a> {
    /// Object under the singular key (`user`).
    Singular(&'a Object),
    /// Object under the plural key (`users`).
    Plural(&'a Object),
    /// First element of an array under the plural key (`users[0]`).
    PluralFirst(&'a Object),
    /// Not present in any known shape.
    Absent,
}

impl<'a> RelationShape<'a> {
    /// The related object, unless absent.
    #[must_use]
    pub const fn object(self) -> Option<&'a Object> {
        match self {
            Self::Singular(obj) | Self::Plural(obj) | Self::PluralFirst(obj) => Some(obj),
            Self::Absent => None,
        }
    }
}

/// A denormalized relation and the keys it may appear under.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    singular: &'static str,
    plural: &'static str,
}

/// Customer snapshot embedded in orders.
pub const CUSTOMER: Relation = Relation::new("user", "users");

/// Store snapshot embedded in orders.
pub const STORE: Relation = Relation::new("store", "stores");

/// Menu item snapshot embedded in order items.
pub const MENU_ITEM: Relation = Relation::new("menu_item", "menu_items");

impl Relation {
    /// Define a relation by its singular and plural keys.
    #[must_use]
    pub const fn new(singular: &'static str, plural: &'static str) -> Self {
        Self { singular, plural }
    }

    /// Every shape present in `record`, in resolution order.
    #[must_use]
    pub fn candidates<'a>(&self, record: &'a Value) -> Vec<RelationShape<'a>> {
        let mut shapes = Vec::with_capacity(3);
        if let Some(obj) = record.get(self.singular).and_then(Value::as_object) {
            shapes.push(RelationShape::Singular(obj));
        }
        match record.get(self.plural) {
            Some(Value::Object(obj)) => shapes.push(RelationShape::Plural(obj)),
            Some(Value::Array(items)) => {
                if let Some(obj) = items.first().and_then(Value::as_object) {
                    shapes.push(RelationShape::PluralFirst(obj));
                }
            }
            _ => {}
        }
        shapes
    }

    /// The first shape present in `record`, or [`RelationShape::Absent`].
    #[must_use]
    pub fn resolve<'a>(&self, record: &'a Value) -> RelationShape<'a> {
        self.candidates(record)
            .into_iter()
            .next()
            .unwrap_or(RelationShape::Absent)
    }

    /// Resolve a text field of the relation.
    ///
    /// Shapes are tried in resolution order; within each shape, `keys` are
    /// tried in order. Empty strings count as missing.
    #[must_use]
    pub fn text(&self, record: &Value, keys: &[&str]) -> Resolved<String> {
        self.candidates(record)
            .into_iter()
            .filter_map(RelationShape::object)
            .find_map(|obj| keys.iter().find_map(|key| text_value(obj.get(*key))))
            .into()
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// Unwrap a `{data: ...}` envelope, or return the value unchanged.
#[must_use]
pub fn unwrap_data(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner) if !inner.is_null() => inner,
        _ => value,
    }
}

/// The records of a list response.
///
/// Accepts a bare array or an envelope whose `data` is an array. Anything
/// else yields no records.
#[must_use]
pub fn list_items<'a>(value: &'a Value, resource: &str) -> &'a [Value] {
    if let Some(items) = unwrap_data(value).as_array() {
        return items;
    }
    warn!(resource, "List response is not an array; treating as empty");
    &[]
}

// =============================================================================
// Scalar fields
// =============================================================================

/// Read a non-empty text field. Numbers are rendered as text.
#[must_use]
pub fn text_field(record: &Value, key: &str) -> Option<String> {
    text_value(record.get(key))
}

fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read an id field with the given parser, treating malformed ids as missing.
pub fn id_field<T, E: std::fmt::Display>(
    record: &Value,
    key: &str,
    parse: impl FnOnce(&Value) -> Result<T, E>,
) -> Option<T> {
    let value = record.get(key).filter(|v| !v.is_null())?;
    match parse(value) {
        Ok(id) => Some(id),
        Err(e) => {
            debug!(key, error = %e, "Ignoring malformed id");
            None
        }
    }
}

/// Read a money field; missing or unparseable amounts become the sentinel.
#[must_use]
pub fn money_field(record: &Value, key: &str) -> Resolved<Money> {
    let Some(value) = record.get(key).filter(|v| !v.is_null()) else {
        return Resolved::NotAvailable;
    };
    match Money::from_json(value) {
        Ok(money) => Resolved::Available(money),
        Err(e) => {
            debug!(key, error = %e, "Amount not available");
            Resolved::NotAvailable
        }
    }
}

/// Read a timestamp field.
///
/// Accepts RFC 3339 and offset-less ISO timestamps (interpreted as UTC).
#[must_use]
pub fn timestamp_field(record: &Value, key: &str) -> Option<DateTime<Utc>> {
    let raw = record.get(key)?.as_str()?.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
