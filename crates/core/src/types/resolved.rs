//! Explicit "not available" sentinel for values resolved from partial data.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display text for a value that could not be resolved.
pub const NOT_AVAILABLE: &str = "N/A";

/// A value that was either resolved from a backend response or is known to
/// be unavailable.
///
/// Unlike `Option`, this type is meant to reach the display layer: its
/// [`Display`](fmt::Display) impl renders the sentinel as `N/A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolved<T> {
    /// The value was present and well-formed.
    Available(T),
    /// The value was missing or malformed.
    #[default]
    NotAvailable,
}

impl<T> Resolved<T> {
    /// Returns `true` if the value was resolved.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Borrow the inner value.
    #[must_use]
    pub const fn as_ref(&self) -> Resolved<&T> {
        match self {
            Self::Available(value) => Resolved::Available(value),
            Self::NotAvailable => Resolved::NotAvailable,
        }
    }

    /// Map the inner value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolved<U> {
        match self {
            Self::Available(value) => Resolved::Available(f(value)),
            Self::NotAvailable => Resolved::NotAvailable,
        }
    }

    /// Return the inner value or a fallback.
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Self::Available(value) => value,
            Self::NotAvailable => fallback,
        }
    }

    /// Convert into an `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::NotAvailable => None,
        }
    }

    /// Render with a custom formatter, or the sentinel.
    pub fn display_with<F: FnOnce(&T) -> String>(&self, f: F) -> String {
        match self {
            Self::Available(value) => f(value),
            Self::NotAvailable => NOT_AVAILABLE.to_owned(),
        }
    }
}

impl<T> From<Option<T>> for Resolved<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotAvailable, Self::Available)
    }
}

impl<T: fmt::Display> fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(value) => value.fmt(f),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}
