mod device;
mod license;

pub use device::DeviceActivation;
pub use license::{License, LicenseStatus, Plan};
