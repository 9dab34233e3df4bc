//! Response types for the rate engine API.
//!
//! This module defines the success bodies that are not domain types
//! themselves, the error response structure, and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateCardMetadata;
use crate::error::EngineError;
use crate::models::{RateField, Role};

/// Body returned by `GET /roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesResponse {
    /// The rate card the roles come from.
    pub rate_card: RateCardMetadata,
    /// Every role in declaration order.
    pub roles: Vec<Role>,
}

/// Body returned by `POST /rates/resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRateResponse {
    /// The inherited rate, or `null` when there is nothing to inherit.
    pub rate: Option<Decimal>,
    /// The rate card field the resource type inherits from.
    pub source_field: RateField,
}

/// Body returned by `POST /rates/basic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicRateResponse {
    /// Sum of the eleven deduction fields.
    pub total_deductions: Decimal,
    /// Day rate less deductions, floored at zero.
    pub basic_rate: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a role not found error response.
    pub fn role_not_found(name: &str) -> Self {
        Self::with_details(
            "ROLE_NOT_FOUND",
            format!("Role not found: {}", name),
            format!("The role '{}' is not on the loaded rate card", name),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` carrying the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::RoleNotFound { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::role_not_found(&name),
            },
            EngineError::UnknownArrangement { label } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_ARRANGEMENT",
                    format!("Unknown work arrangement: {}", label),
                    "Use one of the six arrangement labels or their snake_case keys",
                ),
            ),
            EngineError::ValidationError { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid value for '{}': {}", field, message),
                    field,
                ),
            ),
            EngineError::InvalidAttendance { date, message } => ApiErrorResponse::bad_request(
                ApiError::new(
                    "INVALID_ATTENDANCE",
                    format!("Invalid attendance on {}: {}", date, message),
                ),
            ),
        }
    }
}
