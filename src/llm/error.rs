use std::time::Duration;

use thiserror::Error;

pub const TIMEOUT_PLACEHOLDER: &str = "Request timeout. Please try again with a shorter fund name.";
pub const UNAVAILABLE_PLACEHOLDER: &str = "Service temporarily unavailable. Please try again later.";

/// Failure of a single completion call. Never surfaced to HTTP callers; each
/// variant is folded into a placeholder string by [`super::CompletionClient`].
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion API timed out after {0:?}")]
    Timeout(Duration),

    #[error("completion API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("completion API transport error: {0}")]
    Transport(String),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout(timeout)
        } else if err.is_decode() {
            CompletionError::MalformedResponse(err.to_string())
        } else {
            CompletionError::Transport(err.to_string())
        }
    }

    pub fn placeholder(&self) -> String {
        match self {
            CompletionError::Timeout(_) => TIMEOUT_PLACEHOLDER.to_string(),
            CompletionError::Http { status, .. } => {
                format!("Error calling completion API: {status}. Please try again.")
            }
            CompletionError::Transport(_) | CompletionError::MalformedResponse(_) => {
                UNAVAILABLE_PLACEHOLDER.to_string()
            }
        }
    }

    /// Value for the `error.type` span attribute and metric label.
    pub fn error_type(&self) -> &'static str {
        match self {
            CompletionError::Timeout(_) => "timeout",
            CompletionError::Http { status: 429, .. } => "rate_limit",
            CompletionError::Http {
                status: 401 | 403, ..
            } => "auth_error",
            CompletionError::Http { status, .. } if *status >= 500 => "server_error",
            CompletionError::Http { .. } => "invalid_request",
            CompletionError::Transport(_) => "network_error",
            CompletionError::MalformedResponse(_) => "invalid_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(
            CompletionError::Timeout(Duration::from_secs(300)).placeholder(),
            TIMEOUT_PLACEHOLDER
        );
        assert_eq!(
            CompletionError::Http {
                status: 503,
                body: "overloaded".to_string()
            }
            .placeholder(),
            "Error calling completion API: 503. Please try again."
        );
        assert_eq!(
            CompletionError::Transport("connection refused".to_string()).placeholder(),
            UNAVAILABLE_PLACEHOLDER
        );
        assert_eq!(
            CompletionError::MalformedResponse("no choices".to_string()).placeholder(),
            UNAVAILABLE_PLACEHOLDER
        );
    }

    #[test]
    fn test_error_type_categories() {
        let http = |status| CompletionError::Http {
            status,
            body: String::new(),
        };
        let cases = vec![
            (CompletionError::Timeout(Duration::from_secs(1)), "timeout"),
            (http(429), "rate_limit"),
            (http(401), "auth_error"),
            (http(403), "auth_error"),
            (http(400), "invalid_request"),
            (http(422), "invalid_request"),
            (http(500), "server_error"),
            (http(503), "server_error"),
            (
                CompletionError::Transport("reset".to_string()),
                "network_error",
            ),
            (
                CompletionError::MalformedResponse("bad json".to_string()),
                "invalid_response",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_type(), expected, "error_type({err:?})");
        }
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = CompletionError::Http {
            status: 503,
            body: "upstream overloaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "completion API error (503): upstream overloaded"
        );
    }
}
