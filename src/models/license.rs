use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use super::DeviceActivation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    /// Terminal state, set administratively. A revoked key never
    /// validates again.
    Revoked,
}

/// Purchase plan, fixed at issuance. Determines the device-seat limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Plan {
    Personal,
    Pro,
    Team,
}

impl Plan {
    /// Seat limit granted at issuance. Changing a plan's limit only
    /// affects licenses issued afterwards; existing records keep the
    /// limit they were issued with.
    pub fn max_activations(self) -> u32 {
        match self {
            Plan::Personal => 2,
            Plan::Pro => 5,
            Plan::Team => 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    /// Opaque unique key, generated at issuance, immutable.
    pub key: String,
    pub email: String,
    /// Seat limit, immutable after issuance.
    pub max_activations: u32,
    pub status: LicenseStatus,
    /// Bound device seats, unique by `device_id`.
    #[serde(default)]
    pub activations: Vec<DeviceActivation>,
    pub created_at: i64,
}

impl License {
    pub fn new(key: String, email: String, max_activations: u32, created_at: i64) -> Self {
        Self {
            key,
            email,
            max_activations,
            status: LicenseStatus::Active,
            activations: Vec::new(),
            created_at,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.status == LicenseStatus::Revoked
    }

    pub fn active_devices(&self) -> u32 {
        self.activations.len() as u32
    }

    pub fn activation(&self, device_id: &str) -> Option<&DeviceActivation> {
        self.activations.iter().find(|a| a.device_id == device_id)
    }

    /// Remove the seat bound to `device_id`. Returns whether a seat was
    /// actually released.
    pub fn remove_activation(&mut self, device_id: &str) -> bool {
        let before = self.activations.len();
        self.activations.retain(|a| a.device_id != device_id);
        self.activations.len() != before
    }
}
