//! Response rendering.
//!
//! The envelope is the whole body and its `status` is the HTTP status.
//! A status outside the valid range is sent as 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::upstream::ResponseEnvelope;

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_follows_envelope() {
        let response = ResponseEnvelope::failure(429, json!({"message": "rate limited"})).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = ResponseEnvelope::success(200, json!({})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_out_of_range_status_becomes_500() {
        let response = ResponseEnvelope::failure(42, json!("odd")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
