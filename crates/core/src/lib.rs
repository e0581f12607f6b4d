//! Orderdesk Core - Shared types library.
//!
//! This crate provides the domain types used across Orderdesk components:
//! - `console` - Data-synchronization layer for the operator console
//! - `cli` - Command-line front end over the console library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for opaque IDs, fixed-point money, order
//!   statuses, and the "not available" sentinel

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
