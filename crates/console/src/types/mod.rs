//! Normalized domain types for the backend admin API.
//!
//! These types provide a stable model separate from the raw, shape-shifting
//! JSON the backend returns. Conversions live in [`crate::conversions`].

pub mod catalog;
pub mod order;

// Re-export all types for convenience
pub use catalog::*;
pub use order::*;
