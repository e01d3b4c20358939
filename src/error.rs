use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl AppError {
    pub fn course_not_found() -> Self {
        AppError::NotFound("Course not found".to_string())
    }

    pub fn enrollment_not_found() -> Self {
        AppError::NotFound("Enrollment not found".to_string())
    }

    pub fn already_enrolled() -> Self {
        AppError::Duplicate("You are already enrolled in this course".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Config(_)
            | AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();

        AppError::BadRequest(messages.join(", "))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Duplicate(msg) => msg,
            AppError::Database(e) => {
                error!("database error: {}", e);
                "Database error occurred".to_string()
            }
            AppError::Migration(e) => {
                error!("migration error: {}", e);
                "Database error occurred".to_string()
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::InternalServerError => "Internal server error".to_string(),
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
