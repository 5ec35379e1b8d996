use crate::error::{AppError, Result};
use crate::models::DeviceActivation;
use crate::store::LicenseStore;
use crate::util::now;

/// Outcome of an `activate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub active_devices: u32,
    pub max_devices: u32,
    /// False when the device already held a seat and the call was a
    /// no-op.
    pub newly_activated: bool,
}

/// Outcome of a `deactivate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deactivation {
    /// Whether a seat was actually released.
    pub removed: bool,
}

/// Bind a device to a license, consuming one seat.
///
/// Re-activating a device that already holds a seat returns the
/// existing binding and never consumes a second seat. The whole
/// check-then-act sequence runs inside the store's write lock, so two
/// racing calls cannot both claim the last free seat.
pub fn activate(
    store: &LicenseStore,
    key: &str,
    device_id: &str,
    device_name: Option<&str>,
) -> Result<Activation> {
    if key.is_empty() {
        return Err(AppError::Validation("key required".into()));
    }
    if device_id.is_empty() {
        return Err(AppError::Validation("device id required".into()));
    }

    store.update(|licenses| {
        let license = licenses
            .get_mut(key)
            .ok_or_else(|| AppError::NotFound("invalid license key".into()))?;

        if license.is_revoked() {
            return Err(AppError::Revoked);
        }

        if license.activation(device_id).is_some() {
            return Ok(Activation {
                active_devices: license.active_devices(),
                max_devices: license.max_activations,
                newly_activated: false,
            });
        }

        if license.active_devices() >= license.max_activations {
            return Err(AppError::LimitExceeded {
                active_devices: license.active_devices(),
                max_devices: license.max_activations,
            });
        }

        license.activations.push(DeviceActivation {
            device_id: device_id.to_string(),
            device_name: device_name.map(String::from),
            activated_at: now(),
        });

        Ok(Activation {
            active_devices: license.active_devices(),
            max_devices: license.max_activations,
            newly_activated: true,
        })
    })
}

/// Release a device's seat.
///
/// Deactivation is idempotent: unbinding a device that was never bound,
/// or a license that no longer exists, is a success with no state
/// change, so clients can retry freely.
pub fn deactivate(store: &LicenseStore, key: &str, device_id: &str) -> Result<Deactivation> {
    if key.is_empty() {
        return Err(AppError::Validation("key required".into()));
    }
    if device_id.is_empty() {
        return Err(AppError::Validation("device id required".into()));
    }

    store.update(|licenses| {
        let Some(license) = licenses.get_mut(key) else {
            // License already gone; nothing to release.
            return Ok(Deactivation { removed: false });
        };

        let removed = license.remove_activation(device_id);
        Ok(Deactivation { removed })
    })
}
