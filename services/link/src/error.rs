use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Link service domain error variants.
///
/// Durable-write degradation during generation is deliberately *not* an
/// error: availability wins over durability there, and the handler surfaces
/// it as a `warning` field instead.
#[derive(Debug, thiserror::Error)]
pub enum LinkServiceError {
    #[error("User not found")]
    AccountNotFound,
    #[error("Your account is already linked with a Minecraft account")]
    AlreadyLinked,
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("Invalid or expired link code")]
    InvalidOrExpiredCode,
    #[error("Linked user not found")]
    OwnerAccountMissing,
    #[error("This Minecraft account is already linked to another user")]
    UuidAlreadyLinked,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl LinkServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::AlreadyLinked => "ALREADY_LINKED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::OwnerAccountMissing => "OWNER_ACCOUNT_MISSING",
            Self::UuidAlreadyLinked => "UUID_ALREADY_LINKED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for LinkServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AccountNotFound | Self::OwnerAccountMissing => StatusCode::NOT_FOUND,
            Self::AlreadyLinked | Self::InvalidInput(_) | Self::InvalidOrExpiredCode => {
                StatusCode::BAD_REQUEST
            }
            Self::UuidAlreadyLinked => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
