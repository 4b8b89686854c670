//! Upstream failure classification.

use std::error::Error as _;

use serde_json::Value;
use thiserror::Error;

use crate::upstream::envelope::ResponseEnvelope;

/// Status used when no upstream response was received.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Why a proxied call did not produce a success envelope.
///
/// Internal to the executor; every variant is folded into a
/// [`ResponseEnvelope`] before it leaves.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    /// The upstream answered with a non-2xx status.
    #[error("upstream responded with status {status}")]
    Status { status: u16, body: Value },

    /// No usable response: DNS, connect, TLS, or body read failure.
    #[error("{}", describe_transport(.0))]
    Transport(#[from] reqwest::Error),

    /// The target URL could not be assembled.
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
}

impl UpstreamFailure {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamFailure::Status { .. } => "status",
            UpstreamFailure::Transport(_) | UpstreamFailure::Url(_) => "transport",
        }
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        match self {
            UpstreamFailure::Status { status, body } => {
                let error = if is_blank(&body) {
                    Value::String(format!("Request failed with status code {status}"))
                } else {
                    body
                };
                ResponseEnvelope::failure(status, error)
            }
            other => ResponseEnvelope::failure(
                TRANSPORT_FAILURE_STATUS,
                Value::String(other.to_string()),
            ),
        }
    }
}

/// Errors raised while constructing the executor.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Render a transport error with its cause chain. The request URL carries
/// the credential, so it is left out.
fn describe_transport(err: &reqwest::Error) -> String {
    let mut description = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "error connecting to upstream".to_string()
    } else if err.is_body() || err.is_decode() {
        "error reading upstream response".to_string()
    } else {
        "error sending request to upstream".to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

fn is_blank(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_failure_keeps_upstream_body() {
        let envelope = UpstreamFailure::Status {
            status: 429,
            body: json!({"message": "rate limited"}),
        }
        .into_envelope();
        assert_eq!(envelope.status, 429);
        assert!(!envelope.success);
        assert_eq!(envelope.error, Some(json!({"message": "rate limited"})));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_status_failure_with_empty_body() {
        let envelope = UpstreamFailure::Status {
            status: 404,
            body: json!(""),
        }
        .into_envelope();
        assert_eq!(envelope.status, 404);
        assert_eq!(
            envelope.error,
            Some(json!("Request failed with status code 404"))
        );
    }

    #[test]
    fn test_url_failure_maps_to_500() {
        let failure = UpstreamFailure::from(url::ParseError::EmptyHost);
        assert_eq!(failure.kind(), "transport");
        let envelope = failure.into_envelope();
        assert_eq!(envelope.status, 500);
        let message = envelope.error.unwrap();
        assert!(message.as_str().unwrap().contains("invalid upstream URL"));
    }

    #[test]
    fn test_kind_labels() {
        let failure = UpstreamFailure::Status {
            status: 500,
            body: Value::Null,
        };
        assert_eq!(failure.kind(), "status");
    }
}
