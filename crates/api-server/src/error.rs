use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::DomainError;
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Everything a handler can fail with, rendered as a JSON error body.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Body(JsonRejection),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::ValidationError { .. }
        | DomainError::InvalidPhoneNumber(_)
        | DomainError::InvalidQueryFormat { .. } => StatusCode::BAD_REQUEST,
        DomainError::DuplicateContact(_) => StatusCode::CONFLICT,
        DomainError::DonorNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::RepositoryError(_) | DomainError::NetworkError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Body(rejection) => {
                let body = ErrorBody {
                    code: "invalid_body",
                    message: rejection.body_text(),
                    field: None,
                };
                return (rejection.status(), Json(body)).into_response();
            }
            ApiError::Domain(err) => err,
        };

        let status = status_for(&err);
        match err {
            DomainError::Unauthorized => (status, "Unauthorized").into_response(),
            DomainError::InvalidQueryFormat {
                blood_type,
                location,
            } => {
                let message = "Invalid query format.";
                let body = json!({
                    "donors": [],
                    "bloodGroup": blood_type,
                    "location": location,
                    "code": "invalid_query_format",
                    "error": message,
                    "message": message,
                });
                (status, Json(body)).into_response()
            }
            DomainError::RepositoryError(_) | DomainError::NetworkError(_) => {
                error!("Request failed: {}", err);
                let body = ErrorBody {
                    code: err.code(),
                    message: "Internal server error".to_string(),
                    field: None,
                };
                (status, Json(body)).into_response()
            }
            other => {
                let field = match &other {
                    DomainError::ValidationError { field, .. } => Some(*field),
                    DomainError::InvalidPhoneNumber(_) | DomainError::DuplicateContact(_) => {
                        Some("contact")
                    }
                    _ => None,
                };
                let body = ErrorBody {
                    code: other.code(),
                    message: other.to_string(),
                    field,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
