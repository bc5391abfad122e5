use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use craftlink_auth_types::session::SessionAccount;

use crate::error::LinkServiceError;
use crate::state::AppState;
use crate::usecase::apply_link::{ApplyLinkInput, ApplyLinkUseCase};
use crate::usecase::generate::{GenerateCodeInput, GenerateCodeUseCase};
use crate::usecase::pending::{PendingCodeInput, PendingCodeUseCase};
use crate::usecase::unlink::UnlinkUseCase;

// ── POST /api/linkcode/generate ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateCodeRequest {
    #[serde(rename = "mcUsername")]
    pub mc_username: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateCodeQuery {
    #[serde(rename = "expiryMinutes")]
    pub expiry_minutes: Option<i64>,
}

#[derive(Serialize)]
pub struct ActiveCodeResponse {
    pub success: bool,
    pub code: String,
    #[serde(serialize_with = "craftlink_core::serde::to_rfc3339_ms")]
    pub expires: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

pub async fn generate_code(
    session: SessionAccount,
    State(state): State<AppState>,
    Query(query): Query<GenerateCodeQuery>,
    body: Option<Json<GenerateCodeRequest>>,
) -> Result<Json<ActiveCodeResponse>, LinkServiceError> {
    let usecase = GenerateCodeUseCase {
        accounts: state.account_repo(),
        codes: state.code_lifecycle(),
    };
    let generated = usecase
        .execute(GenerateCodeInput {
            account_id: session.account_id,
            mc_username: body.and_then(|Json(b)| b.mc_username),
            ttl_minutes: query.expiry_minutes,
        })
        .await?;

    Ok(Json(ActiveCodeResponse {
        success: true,
        code: generated.code,
        expires: generated.expires_at,
        warning: generated
            .degraded
            .then_some("Stored in memory only due to database error"),
    }))
}

// ── GET /api/linkcode ────────────────────────────────────────────────────────

pub async fn get_active_code(
    session: SessionAccount,
    State(state): State<AppState>,
) -> Result<Response, LinkServiceError> {
    let active = state
        .code_lifecycle()
        .get_active_for(session.account_id)
        .await?;

    match active {
        Some(code) => Ok(Json(ActiveCodeResponse {
            success: true,
            code: code.code,
            expires: code.expires_at,
            warning: None,
        })
        .into_response()),
        None => Ok(Json(json!({
            "success": false,
            "error": "No active link code found",
        }))
        .into_response()),
    }
}

// ── POST /api/linkcode/validate ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateCodeRequest {
    pub username: String,
    pub code: String,
    pub uuid: String,
}

/// Plugin-facing: always HTTP 200 with a `success` flag. The Minecraft-side
/// caller branches on the flag, never on status codes.
pub async fn validate_code(
    State(state): State<AppState>,
    Json(body): Json<ValidateCodeRequest>,
) -> Json<Value> {
    let usecase = ApplyLinkUseCase {
        accounts: state.account_repo(),
        codes: state.code_lifecycle(),
        events: state.event_sink(),
    };
    let result = usecase
        .execute(ApplyLinkInput {
            username: body.username,
            code: body.code,
            uuid: body.uuid,
        })
        .await;

    match result {
        Ok(linked) => Json(json!({
            "success": true,
            "message": "Account successfully linked",
            "user": {
                "id": linked.account_id,
                "username": linked.username,
            },
        })),
        Err(LinkServiceError::Internal(e)) => {
            tracing::error!(error = %e, "link validation failed");
            Json(json!({
                "success": false,
                "error": "Server error processing request",
            }))
        }
        Err(e) => Json(json!({
            "success": false,
            "error": e.to_string(),
        })),
    }
}

// ── POST /api/linkcode/pending ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PendingCodeRequest {
    pub username: String,
    pub uuid: String,
}

pub async fn pending_code(
    State(state): State<AppState>,
    Json(body): Json<PendingCodeRequest>,
) -> Json<Value> {
    let usecase = PendingCodeUseCase {
        accounts: state.account_repo(),
        codes: state.code_lifecycle(),
    };
    let result = usecase
        .execute(PendingCodeInput {
            username: body.username,
            uuid: body.uuid,
        })
        .await;

    match result {
        Ok(Some(pending)) => Json(json!({
            "success": true,
            "code": pending.code,
            "expires": pending.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "message": "Pending link code found",
        })),
        Ok(None) => Json(json!({
            "success": false,
            "message": "No pending link codes found",
        })),
        Err(LinkServiceError::Internal(e)) => {
            tracing::error!(error = %e, "pending code lookup failed");
            Json(json!({
                "success": false,
                "error": "Server error processing request",
            }))
        }
        Err(e) => Json(json!({
            "success": false,
            "error": e.to_string(),
        })),
    }
}

// ── DELETE /api/linkcode ─────────────────────────────────────────────────────

pub async fn unlink_account(
    session: SessionAccount,
    State(state): State<AppState>,
) -> Result<Json<Value>, LinkServiceError> {
    let usecase = UnlinkUseCase {
        accounts: state.account_repo(),
        codes: state.code_lifecycle(),
        events: state.event_sink(),
    };
    let unlinked = usecase.execute(session.account_id).await?;

    if unlinked.already_unlinked {
        Ok(Json(json!({
            "message": "Account already unlinked",
            "alreadyUnlinked": true,
        })))
    } else {
        Ok(Json(json!({
            "message": "Account unlinked successfully",
        })))
    }
}
