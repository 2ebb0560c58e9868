use reqwest::StatusCode;
use std::fmt;

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure taxonomy for a single API call. Retryable variants cover the
/// transient cold-start cases (the backend sleeps on the free tier and takes
/// a while to answer its first request).
#[derive(Debug)]
pub enum FetchError {
    /// The request was aborted by the client-side timeout.
    Timeout,
    /// Connection-level failure (refused, reset, DNS).
    Transport { detail: String },
    /// Non-2xx response.
    Http { status: StatusCode, body: String },
    /// Response body did not match the expected JSON shape.
    Malformed { detail: String },
    /// Structurally valid response with nothing usable in it.
    EmptyPayload,
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Transport { .. } => true,
            FetchError::Http { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            FetchError::Malformed { .. } | FetchError::EmptyPayload => false,
        }
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport {
                detail: err.to_string(),
            }
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Transport { detail } => write!(f, "transport error: {detail}"),
            FetchError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            FetchError::Malformed { detail } => write!(f, "malformed payload: {detail}"),
            FetchError::EmptyPayload => write!(f, "empty payload"),
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_start_errors_are_retryable() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::Transport {
            detail: "connection refused".to_string()
        }
        .is_retryable());
        assert!(FetchError::Http {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: String::new()
        }
        .is_retryable());
        assert!(FetchError::Http {
            status: StatusCode::BAD_GATEWAY,
            body: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn permanent_errors_are_not_retryable() {
        assert!(!FetchError::Http {
            status: StatusCode::NOT_FOUND,
            body: String::new()
        }
        .is_retryable());
        assert!(!FetchError::Malformed {
            detail: "x".to_string()
        }
        .is_retryable());
        assert!(!FetchError::EmptyPayload.is_retryable());
    }
}
