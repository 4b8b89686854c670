//! Request identification.
//!
//! # Responsibilities
//! - Expose the per-request ID to handlers for log correlation
//!
//! # Design Decisions
//! - The ID is assigned by `SetRequestIdLayer` as early as possible and
//!   echoed back by `PropagateRequestIdLayer`
//! - A client-supplied `x-request-id` is kept as is

use std::convert::Infallible;
use std::fmt;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const X_REQUEST_ID: &str = "x-request-id";

/// The ID of the request being handled, or `"unknown"` when none is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .extensions
            .get::<tower_http::request_id::RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .or_else(|| {
                parts
                    .headers
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
            })
            .unwrap_or("unknown")
            .to_string();
        Ok(Self(id))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
