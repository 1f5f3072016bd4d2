//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how each
//! variant is rendered to the client.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use baeumteo_core::{
    chat::ChatError, domain::ParseEnumError, ports::PortError, scam_quiz::QuizError,
    walkthrough::WalkthroughError, EntitlementError, ValidationError,
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Missing or malformed user input, fixable by the user.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A tier-gated feature or an exhausted daily quota.
    #[error("{0}")]
    Entitlement(#[from] EntitlementError),

    #[error("{0}")]
    Chat(#[from] ChatError),

    #[error("{0}")]
    Walkthrough(#[from] WalkthroughError),

    #[error("{0}")]
    Quiz(#[from] QuizError),

    /// No valid session cookie accompanied the request.
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseEnumError> for ApiError {
    fn from(e: ParseEnumError) -> Self {
        ApiError::Validation(ValidationError::InvalidValue(e))
    }
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error class.
    pub error: String,
    /// Message fit to show the user.
    pub message: String,
    /// The plan that would lift an entitlement block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_to: Option<String>,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            ApiError::Entitlement(EntitlementError::QuotaExhausted { .. }) => {
                (StatusCode::TOO_MANY_REQUESTS, "quota_exhausted")
            }
            ApiError::Entitlement(EntitlementError::TierRequired { .. }) => {
                (StatusCode::FORBIDDEN, "tier_required")
            }
            ApiError::Entitlement(EntitlementError::UnknownModel(_)) => {
                (StatusCode::BAD_REQUEST, "unknown_model")
            }
            ApiError::Chat(ChatError::ReplyPending) => (StatusCode::CONFLICT, "reply_pending"),
            ApiError::Chat(ChatError::EmptyMessage) => (StatusCode::BAD_REQUEST, "validation"),
            ApiError::Chat(ChatError::NotPending(_)) => (StatusCode::CONFLICT, "chat_reset"),
            ApiError::Walkthrough(_) | ApiError::Quiz(_) => {
                (StatusCode::BAD_REQUEST, "validation")
            }
            ApiError::Unauthenticated | ApiError::Port(PortError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated")
            }
            ApiError::NotFound(_) | ApiError::Port(PortError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            ApiError::Port(PortError::Unexpected(_))
            | ApiError::Config(_)
            | ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status.is_server_error() {
            error!("Request failed: {:?}", self);
            "Internal server error".to_string()
        } else {
            warn!("Request refused ({}): {}", code, self);
            self.to_string()
        };
        let upgrade_to = match &self {
            ApiError::Entitlement(e) => e.upgrade_to().map(|tier| tier.as_str().to_string()),
            _ => None,
        };

        (
            status,
            Json(ErrorBody {
                error: code.to_string(),
                message,
                upgrade_to,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use baeumteo_core::{QuotaKind, SubscriptionTier};

    fn status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn each_error_class_has_its_status() {
        assert_eq!(
            status(ValidationError::MissingCredentials.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(ApiError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(
                EntitlementError::TierRequired {
                    required: SubscriptionTier::Premium,
                    current: SubscriptionTier::Free,
                }
                .into()
            ),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(PortError::NotFound("course 9".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(ChatError::ReplyPending.into()), StatusCode::CONFLICT);
        assert_eq!(
            status(
                EntitlementError::QuotaExhausted {
                    kind: QuotaKind::ChatMessage,
                    limit: 10,
                    upgrade_to: Some(SubscriptionTier::Pro),
                }
                .into()
            ),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status(PortError::Unexpected("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn parse_failures_are_validation_errors() {
        let err: ApiError = "80s".parse::<baeumteo_core::Cohort>().unwrap_err().into();
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "validation"));
    }
}
