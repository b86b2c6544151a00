// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;
use crate::projects::{FormErrors, ProjectError};

/// HTTP API error rendered in the gallery wire format
#[derive(Debug)]
pub enum ApiError {
    // 200 OK with `"error": "error"`; editor clients read form errors from the body
    FormErrors(FormErrors),

    // 400 Bad Request
    BadRequest(String),

    // 403 Forbidden
    Forbidden,

    // 404 Not Found (also used for unauthenticated requests)
    NotFound,

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::FormErrors(_) => StatusCode::OK,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `error` field clients switch on
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::FormErrors(_) => "error",
            ApiError::BadRequest(_) => "error",
            ApiError::Forbidden => "forbidden",
            ApiError::NotFound => "not found",
            ApiError::Conflict(_) => "conflict",
            ApiError::InternalServerError(_) => "error",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::FormErrors(form_errors) => json!({
                "error": self.error_code(),
                "form_errors": form_errors,
            }),
            ApiError::Forbidden | ApiError::NotFound => json!({ "error": self.error_code() }),
            ApiError::BadRequest(message)
            | ApiError::Conflict(message)
            | ApiError::InternalServerError(message) => json!({
                "error": self.error_code(),
                "message": message,
            }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert other error types to ApiError
impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::Validation(form_errors) => ApiError::FormErrors(form_errors),
            ProjectError::PermissionDenied => ApiError::Forbidden,
            ProjectError::NotFound => ApiError::NotFound,
            ProjectError::Conflict { .. } => {
                ApiError::conflict("Project was changed by another save; reload and try again")
            }
            ProjectError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Conflict { .. } => {
                ApiError::conflict("Project was changed by another save; reload and try again")
            }
            StoreError::Corrupt(msg) => {
                tracing::error!("Corrupt record: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::FormErrors(form_errors) => write!(f, "{}", form_errors),
            ApiError::Forbidden => write!(f, "forbidden"),
            ApiError::NotFound => write!(f, "not found"),
            ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
