//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use core_kernel::PortError;
use domain_claims::{ClaimError, ErrorKind};
use domain_journey::JourneyError;

/// An error against one answer or request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Your session has ended due to inactivity")]
    SessionExpired,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldMessage>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldMessage>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::SessionExpired => (
                StatusCode::GONE,
                "session_expired",
                ApiError::SessionExpired.to_string(),
                None,
            ),
            ApiError::ServiceUnavailable(msg) => {
                warn!(message = %msg, "Store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Internal(msg) => {
                error!(message = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                Some(details).filter(|details| !details.is_empty()),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            err if err.is_transient() => ApiError::ServiceUnavailable(err.to_string()),
            PortError::Validation { message, field } => ApiError::Validation {
                details: field
                    .map(|field| {
                        vec![FieldMessage {
                            field,
                            message: message.clone(),
                        }]
                    })
                    .unwrap_or_default(),
                message,
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match (err.kind(), err) {
            (_, ClaimError::Store(port)) => port.into(),
            (_, ClaimError::InvalidAnswer { attribute, message }) => ApiError::Validation {
                message: format!("Invalid answer for {}", attribute),
                details: vec![FieldMessage {
                    field: attribute,
                    message,
                }],
            },
            (ErrorKind::Validation, err) => ApiError::validation(err.to_string()),
            (ErrorKind::Configuration | ErrorKind::Integrity | ErrorKind::Store, err) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JourneyError> for ApiError {
    fn from(err: JourneyError) -> Self {
        match err {
            JourneyError::Claim(err) => err.into(),
            JourneyError::UnknownSlug(_) | JourneyError::NotInSequence { .. } => ApiError::NotFound(err.to_string()),
            JourneyError::Validation { ref errors, .. } => ApiError::Validation {
                details: errors
                    .iter()
                    .map(|error| FieldMessage {
                        field: error.field.to_string(),
                        message: error.message.to_string(),
                    })
                    .collect(),
                message: err.to_string(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldMessage> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldMessage {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::Validation {
            message: "Request failed validation".to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::DecisionError;
    use domain_eligibility::Policy;

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_claim_errors_map_by_kind() {
        assert_eq!(
            status_of(ClaimError::from(DecisionError::RejectedReasonsRequired).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(ClaimError::MissingPolicyAcademicYear(Policy::StudentLoans).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ClaimError::from(DecisionError::NotUndoable).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ClaimError::Store(PortError::not_found("Claim", "ABC12345")).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_lost_store_connection_is_unavailable() {
        assert_eq!(
            status_of(ClaimError::Store(PortError::connection("connection reset")).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(PortError::internal("lock poisoned").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_session_expired_is_gone() {
        assert_eq!(status_of(ApiError::SessionExpired), StatusCode::GONE);
    }

    #[test]
    fn test_invalid_answer_names_the_field() {
        let error: ApiError = ClaimError::invalid_answer("email_address", "not a string").into();
        match error {
            ApiError::Validation { details, .. } => assert_eq!(details[0].field, "email_address"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
