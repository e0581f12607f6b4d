//! Unified error handling for the console.

use orderdesk_core::{IdError, OrderId, StatusError};
use thiserror::Error;

/// Failure of a gateway, repository, or lifecycle operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session, or the server rejected the token. The session has been
    /// cleared; the operator must log in again.
    #[error("Unauthorized: re-authentication required")]
    Unauthorized,

    /// The server answered with a non-2xx status other than 401.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body, passed through verbatim.
        body: String,
    },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response carried a body that is not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A status change for this order is already in flight.
    #[error("Order {0} already has a status change in progress")]
    Busy(OrderId),

    /// The id cannot address a single record.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// The requested target status is not one of the defined states.
    #[error(transparent)]
    InvalidStatus(#[from] StatusError),
}

impl ApiError {
    /// Returns `true` if the operator must log in again.
    #[must_use]
    pub const fn requires_reauth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` if reissuing the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::Transport(_) | Self::Busy(_) => true,
            Self::Unauthorized | Self::Decode(_) | Self::InvalidId(_) | Self::InvalidStatus(_) => {
                false
            }
        }
    }

    /// Short message suitable for showing to the operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            Self::Http { status, body } if body.trim().is_empty() => {
                format!("The server rejected the request (HTTP {status}). Please try again.")
            }
            Self::Http { status, body } => {
                format!("The server rejected the request (HTTP {status}): {body}")
            }
            Self::Transport(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            Self::Decode(_) => {
                "The server sent an unexpected response. Please try again.".to_string()
            }
            Self::Busy(id) => {
                format!("Order #{id} is already being updated. Wait for it to finish.")
            }
            Self::InvalidId(e) => e.to_string(),
            Self::InvalidStatus(e) => e.to_string(),
        }
    }
}
