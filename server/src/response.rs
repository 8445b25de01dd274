//! The JSON envelope shared by every `/api` endpoint.

use serde::Serialize;

/// `{ success, data, error?, message? }`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload, `null` on failure.
    pub data: Option<T>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable summary, e.g. `Found 3 artists`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response without a message.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// A successful response with a summary message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// A failed response.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_has_null_data() {
        let value = serde_json::to_value(ApiResponse::<()>::error("boom")).expect("serializes");
        assert_eq!(
            value,
            json!({ "success": false, "data": null, "error": "boom" })
        );
    }

    #[test]
    fn message_is_optional() {
        let value = serde_json::to_value(ApiResponse::ok(1)).expect("serializes");
        assert!(value.get("message").is_none());
        let value = serde_json::to_value(ApiResponse::with_message(1, "Found 1 results"))
            .expect("serializes");
        assert_eq!(value["message"], json!("Found 1 results"));
    }
}
