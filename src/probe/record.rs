use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::error::TransportError;

use super::StatusPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Status inside the success policy.
    Success,
    /// A response arrived but its status is outside the success policy.
    ServerError,
    /// No usable response: invalid URL, transport failure, timeout or cancellation.
    ConnectionError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionErrorKind {
    InvalidUrl,
    Connect,
    Timeout,
    Transfer,
    Request,
    Cancelled,
    Internal,
}

impl ConnectionErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid url",
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Transfer => "transfer",
            Self::Request => "request",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

impl From<&TransportError> for ConnectionErrorKind {
    fn from(error: &TransportError) -> Self {
        match error {
            TransportError::Connect { .. } => Self::Connect,
            TransportError::Timeout => Self::Timeout,
            TransportError::Transfer { .. } => Self::Transfer,
            TransportError::Request { .. } => Self::Request,
        }
    }
}

/// Outcome of one GET attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    host: Arc<str>,
    outcome: Outcome,
    status: Option<u16>,
    error: Option<ConnectionErrorKind>,
    latency: Duration,
}

impl ResultRecord {
    /// Record for an attempt that received a response with `status`.
    #[must_use]
    pub fn from_status(
        host: Arc<str>,
        status: u16,
        latency: Duration,
        policy: &StatusPolicy,
    ) -> Self {
        Self {
            host,
            outcome: policy.classify(status),
            status: Some(status),
            error: None,
            latency,
        }
    }

    #[must_use]
    pub const fn connection_error(
        host: Arc<str>,
        kind: ConnectionErrorKind,
        latency: Duration,
    ) -> Self {
        Self {
            host,
            outcome: Outcome::ConnectionError,
            status: None,
            error: Some(kind),
            latency,
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    #[must_use]
    pub const fn error(&self) -> Option<ConnectionErrorKind> {
        self.error
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
