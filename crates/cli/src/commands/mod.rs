//! Operator commands.

pub mod catalog;
pub mod dashboard;
pub mod orders;
pub mod session;

use orderdesk_console::ApiError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No operator credentials are configured.
    #[error("Missing credentials: set ORDERDESK_EMAIL and ORDERDESK_PASSWORD")]
    MissingCredentials,

    /// The requested record does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// Output could not be serialized.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Message shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_api_message() {
        let err = CliError::from(ApiError::Unauthorized);
        assert_eq!(
            err.user_message(),
            "Your session has expired. Please log in again."
        );

        let err = CliError::NotFound {
            kind: "Order",
            id: "7".to_string(),
        };
        assert_eq!(err.user_message(), "Order 7 not found");
    }
}
