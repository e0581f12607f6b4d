//! Core types for Orderdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod resolved;
pub mod status;

pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
pub use resolved::{NOT_AVAILABLE, Resolved};
pub use status::{OrderStatus, StatusError};
