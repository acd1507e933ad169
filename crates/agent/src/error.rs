use order_core::FieldErrors;
use serde_json::Value;

/// Every way an order service call can fail.
///
/// `Validation`, `Unauthorized`, `NotFound` and `Server` are derived from the
/// response status. Everything else is a generic failure and is never folded
/// into one of those four.
#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    /// 400: the service rejected the input. Carries the service's error payload.
    #[error("order rejected by service: {0}")]
    Validation(Value),

    /// 401: missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// 404: the target resource does not exist.
    #[error("not found")]
    NotFound,

    /// 5xx: the service failed internally.
    #[error("order service error (status {status})")]
    Server {
        /// Response status code.
        status: u16,
    },

    /// Any other non-success status.
    #[error("unexpected status {status} from order service: {body}")]
    UnexpectedStatus {
        /// Response status code.
        status: u16,
        /// Response body, lossily decoded.
        body: String,
    },

    /// The request never completed: connect failure, timeout, broken body.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The configured base URL cannot be used.
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid client configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl OrderServiceError {
    /// Map a non-success status (and its body) to an error.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match status {
            400 => {
                let payload = serde_json::from_slice(body)
                    .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));
                Self::Validation(payload)
            }
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            s if s >= 500 => Self::Server { status: s },
            s => Self::UnexpectedStatus {
                status: s,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    /// Field-level errors, when this is a `Validation` error with a field map payload.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Validation(payload) => serde_json::from_value(payload.clone()).ok(),
            _ => None,
        }
    }

    /// True when retrying the same request later may succeed.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Server { .. } => true,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// True when the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
