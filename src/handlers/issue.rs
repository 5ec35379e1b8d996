use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::email::EmailSendResult;
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::licensing;
use crate::models::Plan;
use crate::state::AppState;
use crate::util::extract_bearer_token;

/// Admin endpoints are invoked by the payment collaborator after a
/// confirmed purchase, or manually for support. With no token
/// configured they fail closed.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err(AppError::Unauthorized("admin endpoints disabled".into()));
    };

    match extract_bearer_token(headers) {
        Some(token) if token == expected => Ok(()),
        _ => Err(AppError::Unauthorized("invalid admin token".into())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub email: String,
    pub plan: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    pub success: bool,
    pub license_key: String,
    pub email: String,
    pub max_activations: u32,
    pub email_sent: bool,
}

pub async fn issue_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<IssueRequest>,
) -> Result<Json<IssueResponse>> {
    require_admin(&state, &headers)?;

    let plan: Plan = request
        .plan
        .parse()
        .map_err(|_| AppError::Validation(format!("unknown plan: {}", request.plan)))?;

    let license = licensing::issue(&state.store, &request.email, plan, &state.key_prefix)?;

    // The record is durable at this point. A failed send is reported in
    // the response and the logs, never rolled back against the store.
    let email_sent = match state.email.send_license_key(&license.email, &license.key).await {
        Ok(EmailSendResult::Sent) => true,
        Ok(EmailSendResult::Disabled) => false,
        Err(error) => {
            tracing::error!(%error, key = %license.key, "license key email failed");
            false
        }
    };

    Ok(Json(IssueResponse {
        success: true,
        license_key: license.key,
        email: license.email,
        max_activations: license.max_activations,
        email_sent,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeRequest {
    pub license_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeResponse {
    pub success: bool,
}

pub async fn revoke_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RevokeRequest>,
) -> Result<Json<RevokeResponse>> {
    require_admin(&state, &headers)?;

    licensing::revoke(&state.store, &request.license_key)?;

    Ok(Json(RevokeResponse { success: true }))
}
