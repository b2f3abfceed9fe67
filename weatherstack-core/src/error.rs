use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Every way a current-weather fetch can fail.
///
/// All variants are terminal for the call that produced them; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A required argument was absent or empty. Raised before any network activity.
    #[error("Missing required input: {field}")]
    MissingInput { field: &'static str },

    /// The time budget elapsed before the fetch and decode completed.
    #[error("Weather request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The caller cancelled the operation before it completed.
    #[error("Weather request was cancelled")]
    Cancelled,

    /// The provider answered with a non-success HTTP status.
    #[error("weatherstack request failed with status {status}")]
    RemoteFailure { status: StatusCode },

    /// The request could not complete at all (connection, DNS, TLS, body read).
    #[error("Failed to reach weatherstack: {0}")]
    TransportFailure(#[source] reqwest::Error),

    /// The response arrived but did not contain well-formed measurements.
    #[error("Failed to decode weatherstack response: {0}")]
    DecodeFailure(String),
}

impl FetchError {
    pub(crate) fn missing(field: &'static str) -> Self {
        Self::MissingInput { field }
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Transport errors carry the request URL, which contains the access key.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::TransportFailure(err.without_url())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status for [`FetchError::RemoteFailure`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RemoteFailure { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_cancelled_are_distinct() {
        let timeout = FetchError::Timeout(Duration::from_millis(250));
        let cancelled = FetchError::Cancelled;

        assert!(timeout.is_timeout());
        assert!(!timeout.is_cancelled());
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_timeout());
    }

    #[test]
    fn timeout_message_reports_budget() {
        let err = FetchError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Weather request timed out after 1500 ms");
    }

    #[test]
    fn remote_failure_exposes_status() {
        let err = FetchError::RemoteFailure { status: StatusCode::INTERNAL_SERVER_ERROR };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("500"));

        assert_eq!(FetchError::Cancelled.status(), None);
    }

    #[test]
    fn missing_input_names_field() {
        let err = FetchError::missing("location");
        assert_eq!(err.to_string(), "Missing required input: location");
    }
}
