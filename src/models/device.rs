use serde::{Deserialize, Serialize};

/// A device seat bound to a license.
///
/// Owned by exactly one [`License`](super::License) and serialized
/// embedded in its record; it has no identity outside that relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceActivation {
    /// Caller-supplied stable identifier, unique within a license.
    pub device_id: String,
    /// Human-readable label, advisory only.
    pub device_name: Option<String>,
    pub activated_at: i64,
}
