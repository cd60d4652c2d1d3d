//! Device Information Abstraction
//!
//! Provides device identity, operating system and battery information.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Device identity and OS details as reported by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInformation {
    /// Platform name (e.g., "ios", "android", "linux")
    pub platform: String,
    /// Device model or host name
    pub model: String,
    /// Operating system version string
    pub os_version: String,
    /// Hardware manufacturer
    pub manufacturer: String,
    /// Whether the device is an emulator/virtual machine
    pub is_virtual: bool,
    /// Stable per-device identifier
    pub uuid: String,
}

/// Battery state as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryInformation {
    /// Charge level in `[0.0, 1.0]`
    pub battery_level: f32,
    /// Whether the device is currently charging
    pub is_charging: bool,
}

/// Device information service trait
///
/// One-shot queries against the host's device information APIs. Both
/// operations are idempotent; each call re-queries the platform rather than
/// returning cached data.
///
/// # Platform Support
///
/// - **Desktop**: OS identification APIs plus DMI/power-supply inspection
/// - **iOS**: UIDevice
/// - **Android**: Build/BatteryManager
///
/// # Example
///
/// ```ignore
/// use bridge_traits::device::DeviceInfoService;
///
/// async fn describe(service: &dyn DeviceInfoService) -> String {
///     match service.get_info().await {
///         Ok(info) => format!("{} ({})", info.model, info.platform),
///         Err(_) => "unknown device".to_string(),
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait DeviceInfoService: Send + Sync {
    /// Query device identity and OS details
    async fn get_info(&self) -> Result<DeviceInformation>;

    /// Query current battery state
    ///
    /// Returns [`BridgeError::NotAvailable`](crate::error::BridgeError) on
    /// hosts without a battery.
    async fn get_battery_info(&self) -> Result<BatteryInformation>;

    /// Whether the code is running inside a native host shell
    ///
    /// Mirrors the host-runtime check mobile frameworks expose alongside the
    /// device query (native app vs. browser-served build).
    fn is_native_platform(&self) -> bool;
}
