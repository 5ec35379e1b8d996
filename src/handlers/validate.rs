use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractors::Json;
use crate::licensing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub license_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub success: bool,
    pub active_devices: u32,
    pub max_devices: u32,
    pub email: String,
}

pub async fn validate_license(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>> {
    let validation = licensing::validate(&state.store, &request.license_key)?;

    Ok(Json(ValidateResponse {
        success: true,
        active_devices: validation.active_devices(),
        max_devices: validation.max_devices(),
        email: validation.license.email.clone(),
    }))
}
