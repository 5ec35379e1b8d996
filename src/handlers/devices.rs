use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractors::Json;
use crate::licensing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateRequest {
    pub license_key: String,
    pub device_id: String,
    #[serde(default)]
    pub device_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateResponse {
    pub success: bool,
    pub active_devices: u32,
    pub max_devices: u32,
}

pub async fn activate_device(
    State(state): State<AppState>,
    Json(request): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>> {
    let activation = licensing::activate(
        &state.store,
        &request.license_key,
        &request.device_id,
        request.device_name.as_deref(),
    )?;

    if activation.newly_activated {
        tracing::info!(
            device_id = %request.device_id,
            active = activation.active_devices,
            max = activation.max_devices,
            "device activated"
        );
    }

    Ok(Json(ActivateResponse {
        success: true,
        active_devices: activation.active_devices,
        max_devices: activation.max_devices,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateRequest {
    pub license_key: String,
    pub device_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateResponse {
    pub success: bool,
}

pub async fn deactivate_device(
    State(state): State<AppState>,
    Json(request): Json<DeactivateRequest>,
) -> Result<Json<DeactivateResponse>> {
    let outcome = licensing::deactivate(&state.store, &request.license_key, &request.device_id)?;

    if outcome.removed {
        tracing::info!(device_id = %request.device_id, "device deactivated");
    }

    Ok(Json(DeactivateResponse { success: true }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesQuery {
    pub license_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    pub device_name: Option<String>,
    pub activated_at: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesResponse {
    pub devices: Vec<DeviceInfo>,
    pub active_devices: u32,
    pub max_devices: u32,
}

pub async fn list_devices(
    State(state): State<AppState>,
    Query(query): Query<DevicesQuery>,
) -> Result<Json<DevicesResponse>> {
    let validation = licensing::validate(&state.store, &query.license_key)?;

    let devices: Vec<DeviceInfo> = validation
        .license
        .activations
        .iter()
        .map(|a| DeviceInfo {
            device_id: a.device_id.clone(),
            device_name: a.device_name.clone(),
            activated_at: a.activated_at,
        })
        .collect();

    Ok(Json(DevicesResponse {
        devices,
        active_devices: validation.active_devices(),
        max_devices: validation.max_devices(),
    }))
}
