//! Orderdesk console library.
//!
//! The order and catalog data-synchronization layer of the operator console:
//!
//! - [`session`] - bearer-token lifecycle
//! - [`gateway`] - the single choke point for backend HTTP calls
//! - [`repositories`] - CRUD facades that normalize response shapes
//! - [`lifecycle`] - order status changes with per-order exclusivity
//! - [`dashboard`] - summary metrics over orders and stores
//!
//! [`Console`] wires them together around one session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod conversions;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod lifecycle;
pub mod normalize;
pub mod repositories;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod types;

pub use config::{ConsoleConfig, Credentials};
pub use error::ApiError;
pub use state::Console;
