use crate::error::{AppError, Result};
use crate::models::License;
use crate::store::LicenseStore;

/// Outcome of a successful entitlement check.
#[derive(Debug, Clone)]
pub struct Validation {
    pub license: License,
}

impl Validation {
    pub fn active_devices(&self) -> u32 {
        self.license.active_devices()
    }

    pub fn max_devices(&self) -> u32 {
        self.license.max_activations
    }
}

/// Read-only entitlement check for a presented key.
///
/// Never mutates the store, so any number of callers may run this
/// concurrently with writers without coordination.
pub fn validate(store: &LicenseStore, key: &str) -> Result<Validation> {
    if key.is_empty() {
        return Err(AppError::Validation("key required".into()));
    }

    let license = store
        .find_by_key(key)?
        .ok_or_else(|| AppError::NotFound("key not found".into()))?;

    if license.is_revoked() {
        return Err(AppError::Revoked);
    }

    Ok(Validation { license })
}
