//! Error types for the provenance dashboard
//!
//! Chart construction itself is total and never fails. Errors come from
//! two places only:
//! - The one-time load of the input tables at startup
//! - The HTTP surface (unknown figure ids, malformed queries)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Request errors (1xxx)
    InvalidQuery,

    // Resource errors (4xxx)
    FigureNotFound,

    // Data errors (7xxx)
    DataLoadError,
    CsvError,
    MissingColumn,

    // Internal errors (9xxx)
    ConfigurationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::InvalidQuery => 1001,
            ErrorCode::FigureNotFound => 4001,
            ErrorCode::DataLoadError => 7001,
            ErrorCode::CsvError => 7002,
            ErrorCode::MissingColumn => 7003,
            ErrorCode::ConfigurationError => 9001,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    // Resource errors
    #[error("Figure not found: {id}")]
    FigureNotFound { id: String },

    // Data errors
    #[error("Failed to load {path}: {message}")]
    DataLoad { path: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    // Internal errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidQuery { .. } => ErrorCode::InvalidQuery,
            AppError::FigureNotFound { .. } => ErrorCode::FigureNotFound,
            AppError::DataLoad { .. } => ErrorCode::DataLoadError,
            AppError::Csv(_) => ErrorCode::CsvError,
            AppError::MissingColumn { .. } => ErrorCode::MissingColumn,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            AppError::FigureNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DataLoad { .. } |
            AppError::Csv(_) |
            AppError::MissingColumn { .. } |
            AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string()
        }
    }
}
