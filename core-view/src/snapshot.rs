//! Normalized capability snapshots.
//!
//! Each probe maps the raw bridge result into one of these flat records.
//! Snapshots are plain values: the view state owns them exclusively and
//! whole-record overwrites are the only mutation (network snapshots are
//! replaced in full on every change notification, last-write-wins).

use bridge_traits::device::{BatteryInformation, DeviceInformation};
use bridge_traits::geolocation::Position;
use bridge_traits::network::{ConnectionType, NetworkStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host platform identity, written once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub platform_name: String,
    pub is_native_platform: bool,
}

/// Device identity and OS details, written once at startup.
///
/// Stays at its all-empty default when the device probe fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Device model (the bridge's `model` field)
    pub name: String,
    /// Platform the device runs (the bridge's `platform` field)
    pub operating_system: String,
    pub os_version: String,
    pub manufacturer: String,
    pub is_virtual: bool,
    pub uuid: String,
}

impl From<DeviceInformation> for DeviceSnapshot {
    fn from(info: DeviceInformation) -> Self {
        Self {
            name: info.model,
            operating_system: info.platform,
            os_version: info.os_version,
            manufacturer: info.manufacturer,
            is_virtual: info.is_virtual,
            uuid: info.uuid,
        }
    }
}

/// Battery state, written once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatterySnapshot {
    /// Charge level in `[0.0, 1.0]`
    pub level: f32,
    pub is_charging: bool,
}

impl From<BatteryInformation> for BatterySnapshot {
    fn from(info: BatteryInformation) -> Self {
        Self {
            level: info.battery_level,
            is_charging: info.is_charging,
        }
    }
}

/// Network state, written at startup and overwritten in full on every
/// change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub is_connected: bool,
    pub connection_type: ConnectionType,
}

impl Default for NetworkSnapshot {
    fn default() -> Self {
        Self {
            is_connected: false,
            connection_type: ConnectionType::Unknown,
        }
    }
}

impl From<NetworkStatus> for NetworkSnapshot {
    fn from(status: NetworkStatus) -> Self {
        Self {
            is_connected: status.connected,
            connection_type: status.connection_type,
        }
    }
}

/// Position fix, written once at startup; absent when the probe fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Position> for LocationSnapshot {
    fn from(position: Position) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
        }
    }
}

/// The view's two phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPhase {
    /// Probe sequence running; no subscriptions active
    #[default]
    Initializing,
    /// All probes complete, subscriptions live
    Active,
}

/// Aggregate view state exposed to host shells for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub phase: ViewPhase,
    pub platform: PlatformInfo,
    pub camera_available: bool,
    pub device: DeviceSnapshot,
    pub battery: BatterySnapshot,
    pub network: NetworkSnapshot,
    pub location: Option<LocationSnapshot>,
    /// When the view reached [`ViewPhase::Active`]
    pub initialized_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_mapping_is_field_for_field() {
        let info = DeviceInformation {
            platform: "ios".to_string(),
            model: "iPhone 15".to_string(),
            os_version: "17.4".to_string(),
            manufacturer: "Apple".to_string(),
            is_virtual: false,
            uuid: "abc-123".to_string(),
        };

        let snapshot = DeviceSnapshot::from(info);
        assert_eq!(snapshot.name, "iPhone 15");
        assert_eq!(snapshot.operating_system, "ios");
        assert_eq!(snapshot.os_version, "17.4");
        assert_eq!(snapshot.manufacturer, "Apple");
        assert!(!snapshot.is_virtual);
        assert_eq!(snapshot.uuid, "abc-123");
    }

    #[test]
    fn test_battery_mapping() {
        let snapshot = BatterySnapshot::from(BatteryInformation {
            battery_level: 0.42,
            is_charging: true,
        });

        assert_eq!(snapshot.level, 0.42);
        assert!(snapshot.is_charging);
    }

    #[test]
    fn test_network_mapping() {
        let snapshot = NetworkSnapshot::from(NetworkStatus {
            connected: true,
            connection_type: ConnectionType::Cellular,
        });

        assert!(snapshot.is_connected);
        assert_eq!(snapshot.connection_type, ConnectionType::Cellular);
    }

    #[test]
    fn test_location_mapping_drops_accuracy() {
        let snapshot = LocationSnapshot::from(Position {
            latitude: 59.91,
            longitude: 10.75,
            accuracy: Some(8.0),
        });

        assert_eq!(snapshot.latitude, 59.91);
        assert_eq!(snapshot.longitude, 10.75);
    }

    #[test]
    fn test_state_serializes_for_host_shells() {
        let state = ViewState {
            phase: ViewPhase::Active,
            camera_available: true,
            ..ViewState::default()
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "active");
        assert_eq!(json["camera_available"], true);
        assert_eq!(json["network"]["connection_type"], "unknown");
        assert!(json["location"].is_null());
    }

    #[test]
    fn test_default_state_is_initializing() {
        let state = ViewState::default();

        assert_eq!(state.phase, ViewPhase::Initializing);
        assert!(!state.camera_available);
        assert_eq!(state.device, DeviceSnapshot::default());
        assert_eq!(state.network.connection_type, ConnectionType::Unknown);
        assert!(state.location.is_none());
        assert!(state.initialized_at.is_none());
    }
}
