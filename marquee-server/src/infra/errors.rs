use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use marquee_core::{CatalogError, FieldErrors};
use serde_json::json;
use std::fmt;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<FieldErrors>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 400 listing every offending field.
    pub fn invalid(fields: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid input".to_string(),
            fields: Some(fields),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "message": self.message,
            "status": self.status.as_u16(),
        });
        if let Some(fields) = self.fields {
            error["fields"] = json!(fields);
        }

        (self.status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => Self::not_found(msg),
            CatalogError::Validation(fields) => Self::invalid(fields),
            CatalogError::Database(err) => err.into(),
            CatalogError::Internal(msg) => {
                error!(error = %msg, "catalog operation failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::invalid(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        error!(error = ?err, "request failed");
        Self::internal("Internal server error")
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        error!(error = ?err, "database operation failed");
        Self::internal("Database operation failed")
    }
}
