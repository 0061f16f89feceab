//! Handler errors and their HTTP problem responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use forge_core::error::{DomainError, RepoError};
use forge_core::ports::{AuthError, MediaError};
use forge_shared::ErrorResponse;
use validator::ValidationErrors;

/// Handler failure, rendered as an RFC 7807 problem document.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::PayloadTooLarge(detail) => {
                ErrorResponse::new(413, "Payload Too Large").with_detail(detail)
            }
            AppError::UnsupportedMediaType(detail) => {
                ErrorResponse::new(415, "Unsupported Media Type").with_detail(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "Request failed");
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(errors.join(", "))
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Every broken catalog rule is a 422.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(vec![err.to_string()])
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Digest(msg) => AppError::Internal(msg),
            _ => AppError::Unauthorized,
        }
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnknownFolder(folder) => {
                AppError::NotFound(format!("Unknown upload folder '{folder}'"))
            }
            MediaError::UnsupportedType(_) => AppError::UnsupportedMediaType(err.to_string()),
            MediaError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            MediaError::Empty | MediaError::InvalidPath(_) => AppError::BadRequest(err.to_string()),
            MediaError::Io(msg) => AppError::Internal(msg),
        }
    }
}

/// Flatten field errors into `field: message` lines, sorted for stable output.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_errors(&errors, "", &mut messages);
        messages.sort();
        AppError::Validation(messages)
    }
}

fn collect_validation_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", error.code));
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_errors(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use forge_shared::dto::ContactRequest;
    use validator::Validate;

    #[test]
    fn test_validation_errors_are_flattened() {
        let request = ContactRequest {
            name: "A".to_string(),
            email: "nope".to_string(),
            phone: None,
            company: None,
            subject: None,
            message: "Need a quote for a line".to_string(),
            locale: None,
        };
        let err = AppError::from(request.validate().unwrap_err());

        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].starts_with("email: "));
                assert!(messages[1].starts_with("name: "));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_media_errors_map_to_statuses() {
        let too_large = AppError::from(MediaError::TooLarge { size: 2, max: 1 });
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let bad_type = AppError::from(MediaError::UnsupportedType("text/html".to_string()));
        assert_eq!(bad_type.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let folder = AppError::from(MediaError::UnknownFolder("etc".to_string()));
        assert_eq!(folder.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_error_body_is_problem_details() {
        let response = AppError::Conflict("slug taken".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 409);
        assert_eq!(json["title"], "Conflict");
        assert_eq!(json["detail"], "slug taken");
    }
}
