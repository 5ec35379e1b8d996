use std::sync::Arc;

use crate::email::EmailService;
use crate::store::LicenseStore;

/// Shared state for the HTTP boundary.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LicenseStore>,
    pub email: EmailService,
    /// Prefix baked into generated license keys.
    pub key_prefix: String,
    /// Bearer token guarding the admin endpoints. None disables them.
    pub admin_token: Option<String>,
}
