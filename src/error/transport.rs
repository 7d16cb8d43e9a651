use thiserror::Error;

/// Failure of a single GET attempt below the HTTP status layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {message}")]
    Connect { message: String },
    #[error("request timed out")]
    Timeout,
    #[error("response transfer failed: {message}")]
    Transfer { message: String },
    #[error("request failed: {message}")]
    Request { message: String },
}

impl TransportError {
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect { message }
        } else if err.is_body() || err.is_decode() {
            Self::Transfer { message }
        } else {
            Self::Request { message }
        }
    }
}
