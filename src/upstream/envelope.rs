//! The uniform JSON body returned by every relay route.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "Successfully fetched the data";
pub const FAILURE_MESSAGE: &str = "Failed to fetch data from the API";

/// Result of one proxied call.
///
/// `data` is set iff `success`, `error` is set iff not. `status` doubles as
/// the HTTP status of the outgoing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ResponseEnvelope {
    pub fn success(status: u16, data: Value) -> Self {
        Self {
            status,
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(status: u16, error: Value) -> Self {
        Self {
            status,
            success: false,
            message: FAILURE_MESSAGE.to_string(),
            data: None,
            error: Some(error),
        }
    }
}
