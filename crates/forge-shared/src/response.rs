//! JSON envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};

/// `{"success": true, "data": ...}` wrapper for successful calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

/// Fixed body of a throttled contact or newsletter submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooManyRequestsBody {
    pub error: String,
}

impl Default for TooManyRequestsBody {
    fn default() -> Self {
        Self {
            error: "Too many requests. Please try again later.".to_string(),
        }
    }
}

/// Problem details document (RFC 7807) used for every error status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..self
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_too_many_requests_body_shape() {
        let json = serde_json::to_value(TooManyRequestsBody::default()).unwrap();
        assert_eq!(json, json!({ "error": "Too many requests. Please try again later." }));
    }

    #[test]
    fn test_problem_details_skip_empty_fields() {
        let json = serde_json::to_value(ErrorResponse::unauthorized()).unwrap();
        assert_eq!(json, json!({ "type": "about:blank", "title": "Unauthorized", "status": 401 }));
    }

    #[test]
    fn test_envelope_message_is_optional() {
        let plain = serde_json::to_value(ApiResponse::ok(3)).unwrap();
        assert_eq!(plain, json!({ "success": true, "data": 3 }));

        let noted = serde_json::to_value(ApiResponse::ok_with_message("id", "Deleted")).unwrap();
        assert_eq!(noted["message"], "Deleted");
    }
}
