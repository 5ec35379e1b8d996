use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Application error. Business-rule variants are expected outcomes and
/// render as structured `{success: false, error}` bodies with stable
/// messages the desktop client matches on; `Storage` is operational and
/// renders as a generic 500 with the detail kept in the logs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing input: absent field, empty key, unknown plan.
    #[error("{0}")]
    Validation(String),

    /// Admin endpoint called without a valid bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// License key or device not present in the store.
    #[error("{0}")]
    NotFound(String),

    /// Seat cap reached on an activate call. Carries the counts so the
    /// client can tell the user how many seats the plan allows.
    #[error("activation limit reached")]
    LimitExceeded { active_devices: u32, max_devices: u32 },

    /// License was revoked administratively.
    #[error("license revoked")]
    Revoked,

    /// Freshly generated key collided with an existing one. Issuance
    /// retries internally with a new key; this variant never reaches
    /// the HTTP boundary under normal operation.
    #[error("duplicate license key")]
    DuplicateKey,

    /// Persistence failure. Propagated so the boundary returns a 5xx;
    /// the caller decides whether to retry the whole request.
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_devices: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_devices: Option<u32>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, counts) = match &self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, message.clone(), None)
            }
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, message.clone(), None)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone(), None),
            AppError::LimitExceeded {
                active_devices,
                max_devices,
            } => (
                StatusCode::FORBIDDEN,
                self.to_string(),
                Some((*active_devices, *max_devices)),
            ),
            AppError::Revoked => (StatusCode::FORBIDDEN, self.to_string(), None),
            AppError::DuplicateKey | AppError::Storage(_) => {
                tracing::error!(error = %self, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error,
            active_devices: counts.map(|(active, _)| active),
            max_devices: counts.map(|(_, max)| max),
        };

        (status, axum::Json(body)).into_response()
    }
}
