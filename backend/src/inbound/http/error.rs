//! HTTP mapping for domain failures.
//!
//! The domain taxonomy stays transport agnostic; this module performs the
//! one-to-one mapping onto status codes and the JSON error envelope. Store
//! failures are logged in full and redacted before they reach the client.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pagination::PageRequestError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::middleware::TraceId;

/// JSON error envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable failure code.
    #[schema(example = "organization_not_found")]
    pub code: String,
    /// Human-readable message.
    #[schema(example = "organization not found")]
    pub message: String,
    /// Correlation identifier matching the `Trace-Id` response header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// A failed request: the status to answer with plus the envelope body.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.into(),
                message: message.into(),
                trace_id: TraceId::current().map(|id| id.to_string()),
            },
        }
    }

    /// Stable machine-readable failure code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.body.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.body.message
    }
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_)
        | DomainError::InvalidIdentifier(_)
        | DomainError::InvalidAccessLevel(_)
        | DomainError::NotAuthorized
        | DomainError::AlreadyMember
        | DomainError::CannotRemoveCreator
        | DomainError::DuplicateUser
        | DomainError::DuplicateOrganization => StatusCode::BAD_REQUEST,
        DomainError::UserNotFound
        | DomainError::OrganizationNotFound
        | DomainError::MemberNotFound => StatusCode::NOT_FOUND,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        let status = status_for(&value);
        if let DomainError::Store(message) = &value {
            // Keep the driver detail in the logs, not in the response.
            error!(error = %message, "store failure surfaced to client");
            return Self::new(status, value.code(), "internal server error");
        }
        Self::new(status, value.code(), value.to_string())
    }
}

impl From<PageRequestError> for ApiError {
    fn from(value: PageRequestError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "validation_error",
            value.to_string(),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.body)
    }
}

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
