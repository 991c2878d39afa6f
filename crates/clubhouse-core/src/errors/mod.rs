// ABOUTME: Unified error handling with standard error codes and HTTP status mapping
// ABOUTME: Defines AppError, ErrorCode, and the JSON error response body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Unified Error Handling System
//!
//! Every failure that reaches an HTTP client is an [`AppError`] carrying an
//! [`ErrorCode`]. Authorization denials (`InvalidCredential`, `MissingCredential`,
//! `ForbiddenAccess`) are terminal and never retried. Store failures surface as
//! `DatabaseError` so they stay distinguishable from denials.

/// Store-level error types
pub mod database;

pub use database::DatabaseError;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    /// Bad login, or a token that failed verification
    #[serde(rename = "INVALID_CREDENTIAL")]
    InvalidCredential = 1000,
    /// A guarded operation was called without a token
    #[serde(rename = "MISSING_CREDENTIAL")]
    MissingCredential = 1001,
    /// Valid identity whose role is not allowed
    #[serde(rename = "FORBIDDEN_ACCESS")]
    ForbiddenAccess = 1002,

    // Validation (3000-3999)
    /// Request body or parameters failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// Resource does not exist
    #[serde(rename = "NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Registration email collides with an existing identity
    #[serde(rename = "DUPLICATE_IDENTITY")]
    DuplicateIdentity = 4001,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Credential store or other database failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::InvalidCredential | Self::MissingCredential => 401,
            Self::ForbiddenAccess => 403,
            Self::ResourceNotFound => 404,
            Self::DuplicateIdentity => 409,
            Self::ConfigError | Self::InternalError | Self::DatabaseError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "The provided credentials are invalid",
            Self::MissingCredential => "Authentication is required to access this resource",
            Self::ForbiddenAccess => "You do not have permission to perform this action",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::DuplicateIdentity => "An account with this email already exists",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }

    /// Whether this code is an authorization denial (as opposed to a fault)
    #[must_use]
    pub const fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredential | Self::MissingCredential | Self::ForbiddenAccess
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Bad login or rejected token
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredential, message)
    }

    /// No token presented
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingCredential, message)
    }

    /// Insufficient role
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ForbiddenAccess, message)
    }

    /// Email already registered
    pub fn duplicate_identity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateIdentity, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
            },
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = match &error {
            DatabaseError::NotFound { .. } => ErrorCode::ResourceNotFound,
            DatabaseError::UniqueViolation { .. } => ErrorCode::DuplicateIdentity,
            DatabaseError::InvalidReference { .. } => ErrorCode::InvalidInput,
            _ => ErrorCode::DatabaseError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("Serialization failed: {error}")).with_source(error)
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{AppError, ErrorResponse};
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use http::StatusCode;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status =
                StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            if status.is_server_error() {
                tracing::error!(code = ?self.code, error = %self, "Request failed");
            } else if self.code.is_denial() {
                tracing::debug!(code = ?self.code, "Request denied");
            }

            (status, Json(ErrorResponse::from(&self))).into_response()
        }
    }
}
