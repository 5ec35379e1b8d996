use crate::error::{AppError, Result};
use crate::models::{License, LicenseStatus};
use crate::store::LicenseStore;

/// Administratively revoke a license.
///
/// Terminal: the key stops validating, and every bound device loses its
/// seat immediately.
pub fn revoke(store: &LicenseStore, key: &str) -> Result<License> {
    if key.is_empty() {
        return Err(AppError::Validation("key required".into()));
    }

    store.update(|licenses| {
        let license = licenses
            .get_mut(key)
            .ok_or_else(|| AppError::NotFound("key not found".into()))?;

        license.status = LicenseStatus::Revoked;
        license.activations.clear();

        tracing::info!(key = %license.key, "license revoked");
        Ok(license.clone())
    })
}
