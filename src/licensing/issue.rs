use crate::error::{AppError, Result};
use crate::keygen;
use crate::models::{License, Plan};
use crate::store::LicenseStore;
use crate::util::now;

/// Attempts before a key collision is reported as a storage failure.
/// With ~99 bits of key entropy even a single collision means the RNG
/// is broken, not that we were unlucky.
const MAX_KEY_ATTEMPTS: usize = 5;

/// Create and persist a new license for `email` on `plan`.
///
/// The generated key is globally unique: the uniqueness check and the
/// insert run in one store critical section, and a collision triggers a
/// retry with a fresh key rather than surfacing to the caller. Email
/// delivery of the key is the gateway's concern, not this function's;
/// the record is durable once this returns.
pub fn issue(store: &LicenseStore, email: &str, plan: Plan, key_prefix: &str) -> Result<License> {
    if email.is_empty() {
        return Err(AppError::Validation("email required".into()));
    }

    for _ in 0..MAX_KEY_ATTEMPTS {
        let key = keygen::generate_license_key(key_prefix);
        let license = License::new(key, email.to_string(), plan.max_activations(), now());

        let inserted = store.update(|licenses| {
            if licenses.contains_key(&license.key) {
                return Err(AppError::DuplicateKey);
            }
            licenses.insert(license.key.clone(), license.clone());
            Ok(())
        });

        match inserted {
            Ok(()) => {
                tracing::info!(key = %license.key, plan = plan.as_ref(), "license issued");
                return Ok(license);
            }
            Err(AppError::DuplicateKey) => {
                tracing::warn!(key = %license.key, "license key collision, regenerating");
            }
            Err(other) => return Err(other),
        }
    }

    Err(AppError::Storage(
        "could not generate a unique license key".into(),
    ))
}
