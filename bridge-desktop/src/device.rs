//! Device Information Implementation

use async_trait::async_trait;
use bridge_traits::{
    device::{BatteryInformation, DeviceInformation, DeviceInfoService},
    error::{BridgeError, Result},
};
use sysinfo::System;
use tracing::debug;

/// Desktop device information service backed by `sysinfo`.
///
/// OS identity comes from `sysinfo`; manufacturer, virtualization and the
/// machine identifier come from DMI sysfs on Linux. On other desktop
/// platforms those fields stay empty rather than failing the whole query.
pub struct SysinfoDeviceService;

impl SysinfoDeviceService {
    /// Create a new device information service
    pub fn new() -> Self {
        Self
    }
}

impl Default for SysinfoDeviceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceInfoService for SysinfoDeviceService {
    async fn get_info(&self) -> Result<DeviceInformation> {
        let platform = std::env::consts::OS.to_string();
        let os_version = System::os_version()
            .or_else(System::kernel_version)
            .unwrap_or_default();

        let product_name = read_dmi("product_name").await;
        let manufacturer = read_dmi("sys_vendor").await;

        let model = if product_name.is_empty() {
            System::host_name().unwrap_or_default()
        } else {
            product_name.clone()
        };

        let info = DeviceInformation {
            platform,
            model,
            os_version,
            manufacturer: manufacturer.clone(),
            is_virtual: looks_virtual(&product_name) || looks_virtual(&manufacturer),
            uuid: machine_id().await,
        };

        debug!(platform = %info.platform, model = %info.model, "Device info collected");
        Ok(info)
    }

    async fn get_battery_info(&self) -> Result<BatteryInformation> {
        battery_from_sysfs().await
    }

    fn is_native_platform(&self) -> bool {
        true
    }
}

fn looks_virtual(value: &str) -> bool {
    let lower = value.to_lowercase();
    ["qemu", "kvm", "vmware", "virtualbox", "hyper-v", "xen"]
        .iter()
        .any(|marker| lower.contains(marker))
}

#[cfg(target_os = "linux")]
async fn read_dmi(field: &str) -> String {
    tokio::fs::read_to_string(format!("/sys/devices/virtual/dmi/id/{}", field))
        .await
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(not(target_os = "linux"))]
async fn read_dmi(_field: &str) -> String {
    String::new()
}

#[cfg(target_os = "linux")]
async fn machine_id() -> String {
    match tokio::fs::read_to_string("/etc/machine-id").await {
        Ok(id) => id.trim().to_string(),
        Err(_) => read_dmi("product_uuid").await,
    }
}

#[cfg(not(target_os = "linux"))]
async fn machine_id() -> String {
    String::new()
}

#[cfg(target_os = "linux")]
async fn battery_from_sysfs() -> Result<BatteryInformation> {
    let mut entries = tokio::fs::read_dir("/sys/class/power_supply").await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let supply_type = tokio::fs::read_to_string(path.join("type"))
            .await
            .unwrap_or_default();
        if supply_type.trim() != "Battery" {
            continue;
        }

        let capacity = tokio::fs::read_to_string(path.join("capacity"))
            .await
            .ok()
            .and_then(|value| value.trim().parse::<f32>().ok())
            .ok_or_else(|| {
                BridgeError::OperationFailed("battery capacity not readable".to_string())
            })?;
        let status = tokio::fs::read_to_string(path.join("status"))
            .await
            .unwrap_or_default();

        return Ok(BatteryInformation {
            battery_level: (capacity / 100.0).clamp(0.0, 1.0),
            is_charging: status.trim() == "Charging",
        });
    }

    Err(BridgeError::NotAvailable(
        "no battery present on this host".to_string(),
    ))
}

#[cfg(not(target_os = "linux"))]
async fn battery_from_sysfs() -> Result<BatteryInformation> {
    Err(BridgeError::NotAvailable(
        "battery state requires platform power APIs".to_string(),
    ))
}
