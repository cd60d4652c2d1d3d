//! One-shot capability probes.

use std::sync::Arc;

use bridge_traits::camera::CameraService;
use bridge_traits::device::DeviceInfoService;
use bridge_traits::geolocation::GeolocationService;
use bridge_traits::network::NetworkMonitor;
use bridge_traits::time::{LogEntry, LogLevel, LoggerSink};
use core_runtime::events::Capability;
use core_runtime::logging::redact_if_sensitive;
use tracing::{debug, warn};

use crate::error::ProbeError;
use crate::log::EventLog;
use crate::snapshot::{
    BatterySnapshot, DeviceSnapshot, LocationSnapshot, NetworkSnapshot, PlatformInfo,
};

/// Runs the one-shot capability queries and normalizes their results.
///
/// Each probe is independently callable and idempotent: invoking it again
/// re-queries the external service, nothing is cached here. Failures are
/// returned to the caller; the initialization sequencer decides what to do
/// with them (it tolerates all of them).
pub struct CapabilityProbe {
    device: Arc<dyn DeviceInfoService>,
    camera: Arc<dyn CameraService>,
    network: Arc<dyn NetworkMonitor>,
    geolocation: Arc<dyn GeolocationService>,
    log: Arc<EventLog>,
    diagnostics: Option<Arc<dyn LoggerSink>>,
}

impl CapabilityProbe {
    pub fn new(
        device: Arc<dyn DeviceInfoService>,
        camera: Arc<dyn CameraService>,
        network: Arc<dyn NetworkMonitor>,
        geolocation: Arc<dyn GeolocationService>,
        log: Arc<EventLog>,
        diagnostics: Option<Arc<dyn LoggerSink>>,
    ) -> Self {
        Self {
            device,
            camera,
            network,
            geolocation,
            log,
            diagnostics,
        }
    }

    /// Query platform identity.
    pub async fn probe_platform(&self) -> Result<PlatformInfo, ProbeError> {
        let info = self
            .device
            .get_info()
            .await
            .map_err(|e| ProbeError::new(Capability::Platform, e))?;

        Ok(PlatformInfo {
            platform_name: info.platform,
            is_native_platform: self.device.is_native_platform(),
        })
    }

    /// Check whether a camera can be used.
    ///
    /// Never fails: any capture or permission error from the bridge is the
    /// "unavailable" signal.
    pub async fn probe_camera_availability(&self) -> bool {
        self.camera.is_available().await
    }

    /// Query device identity and OS details.
    pub async fn probe_device_info(&self) -> Result<DeviceSnapshot, ProbeError> {
        let info = self
            .device
            .get_info()
            .await
            .map_err(|e| ProbeError::new(Capability::Device, e))?;

        let snapshot = DeviceSnapshot::from(info);
        debug!(
            uuid = %redact_if_sensitive("uuid", &snapshot.uuid),
            model = %snapshot.name,
            "Device info collected"
        );
        Ok(snapshot)
    }

    /// Query battery state.
    pub async fn probe_battery_info(&self) -> Result<BatterySnapshot, ProbeError> {
        let info = self
            .device
            .get_battery_info()
            .await
            .map_err(|e| ProbeError::new(Capability::Battery, e))?;

        Ok(BatterySnapshot::from(info))
    }

    /// Query network status and report the initial connection type to the
    /// event log.
    pub async fn probe_network_info(&self) -> Result<NetworkSnapshot, ProbeError> {
        let status = self
            .network
            .get_status()
            .await
            .map_err(|e| ProbeError::new(Capability::Network, e))?;

        self.log
            .append(format!("Initial connection type: {}", status.connection_type));
        Ok(NetworkSnapshot::from(status))
    }

    /// Query the current position.
    pub async fn probe_location_info(&self) -> Result<LocationSnapshot, ProbeError> {
        let position = self
            .geolocation
            .get_current_position()
            .await
            .map_err(|e| ProbeError::new(Capability::Location, e))?;

        Ok(LocationSnapshot::from(position))
    }

    /// Record a tolerated probe failure to the diagnostic channel.
    pub(crate) async fn record_failure(&self, error: &ProbeError) {
        warn!(capability = %error.capability, error = %error.source, "Capability probe failed");

        if let Some(sink) = &self.diagnostics {
            let entry = LogEntry::new(LogLevel::Error, "core_view::probe", error.to_string())
                .with_field("capability", error.capability.to_string());
            sink.log(entry).await.ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::camera::{Photo, PhotoConfig};
    use bridge_traits::device::{BatteryInformation, DeviceInformation};
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::geolocation::Position;
    use bridge_traits::network::{
        ConnectionType, NetworkChangeStream, NetworkStatus,
    };
    use mockall::mock;

    mock! {
        pub Device {}

        #[async_trait]
        impl DeviceInfoService for Device {
            async fn get_info(&self) -> BridgeResult<DeviceInformation>;
            async fn get_battery_info(&self) -> BridgeResult<BatteryInformation>;
            fn is_native_platform(&self) -> bool;
        }
    }

    mock! {
        pub Camera {}

        #[async_trait]
        impl CameraService for Camera {
            async fn get_photo(&self, config: PhotoConfig) -> BridgeResult<Photo>;
            async fn is_available(&self) -> bool;
        }
    }

    mock! {
        pub Network {}

        #[async_trait]
        impl NetworkMonitor for Network {
            async fn get_status(&self) -> BridgeResult<NetworkStatus>;
            async fn subscribe_changes(&self) -> BridgeResult<Box<dyn NetworkChangeStream>>;
        }
    }

    mock! {
        pub Geolocation {}

        #[async_trait]
        impl GeolocationService for Geolocation {
            async fn get_current_position(&self) -> BridgeResult<Position>;
        }
    }

    fn sample_device_info() -> DeviceInformation {
        DeviceInformation {
            platform: "android".to_string(),
            model: "Pixel 8".to_string(),
            os_version: "14".to_string(),
            manufacturer: "Google".to_string(),
            is_virtual: false,
            uuid: "9f2d-4c1a".to_string(),
        }
    }

    fn probe_with(
        device: MockDevice,
        camera: MockCamera,
        network: MockNetwork,
        geolocation: MockGeolocation,
    ) -> CapabilityProbe {
        CapabilityProbe::new(
            Arc::new(device),
            Arc::new(camera),
            Arc::new(network),
            Arc::new(geolocation),
            Arc::new(EventLog::new()),
            None,
        )
    }

    fn quiet_mocks() -> (MockDevice, MockCamera, MockNetwork, MockGeolocation) {
        (
            MockDevice::new(),
            MockCamera::new(),
            MockNetwork::new(),
            MockGeolocation::new(),
        )
    }

    #[tokio::test]
    async fn test_platform_probe_maps_fields() {
        let (mut device, camera, network, geolocation) = quiet_mocks();
        device
            .expect_get_info()
            .returning(|| Ok(sample_device_info()));
        device.expect_is_native_platform().return_const(true);

        let probe = probe_with(device, camera, network, geolocation);
        let platform = probe.probe_platform().await.unwrap();

        assert_eq!(platform.platform_name, "android");
        assert!(platform.is_native_platform);
    }

    #[tokio::test]
    async fn test_device_probe_maps_fields() {
        let (mut device, camera, network, geolocation) = quiet_mocks();
        device
            .expect_get_info()
            .returning(|| Ok(sample_device_info()));

        let probe = probe_with(device, camera, network, geolocation);
        let snapshot = probe.probe_device_info().await.unwrap();

        assert_eq!(snapshot.name, "Pixel 8");
        assert_eq!(snapshot.operating_system, "android");
        assert_eq!(snapshot.os_version, "14");
        assert_eq!(snapshot.manufacturer, "Google");
        assert!(!snapshot.is_virtual);
        assert_eq!(snapshot.uuid, "9f2d-4c1a");
    }

    #[tokio::test]
    async fn test_battery_probe_maps_fields() {
        let (mut device, camera, network, geolocation) = quiet_mocks();
        device.expect_get_battery_info().returning(|| {
            Ok(BatteryInformation {
                battery_level: 0.66,
                is_charging: true,
            })
        });

        let probe = probe_with(device, camera, network, geolocation);
        let snapshot = probe.probe_battery_info().await.unwrap();

        assert_eq!(snapshot.level, 0.66);
        assert!(snapshot.is_charging);
    }

    #[tokio::test]
    async fn test_camera_probe_reports_availability() {
        let (device, mut camera, network, geolocation) = quiet_mocks();
        camera.expect_is_available().returning(|| true);

        let probe = probe_with(device, camera, network, geolocation);
        assert!(probe.probe_camera_availability().await);
    }

    #[tokio::test]
    async fn test_camera_probe_never_errors() {
        let (device, mut camera, network, geolocation) = quiet_mocks();
        camera.expect_is_available().returning(|| false);

        let probe = probe_with(device, camera, network, geolocation);
        assert!(!probe.probe_camera_availability().await);
    }

    #[tokio::test]
    async fn test_network_probe_maps_and_logs() {
        let (device, camera, mut network, geolocation) = quiet_mocks();
        network.expect_get_status().returning(|| {
            Ok(NetworkStatus {
                connected: true,
                connection_type: ConnectionType::Wifi,
            })
        });

        let log = Arc::new(EventLog::new());
        let probe = CapabilityProbe::new(
            Arc::new(device),
            Arc::new(camera),
            Arc::new(network),
            Arc::new(geolocation),
            Arc::clone(&log),
            None,
        );

        let snapshot = probe.probe_network_info().await.unwrap();
        assert!(snapshot.is_connected);
        assert_eq!(snapshot.connection_type, ConnectionType::Wifi);
        assert_eq!(log.entries(), vec!["Initial connection type: wifi"]);
    }

    #[tokio::test]
    async fn test_location_probe_maps_fields() {
        let (device, camera, network, mut geolocation) = quiet_mocks();
        geolocation.expect_get_current_position().returning(|| {
            Ok(Position {
                latitude: 40.41,
                longitude: -3.70,
                accuracy: None,
            })
        });

        let probe = probe_with(device, camera, network, geolocation);
        let snapshot = probe.probe_location_info().await.unwrap();

        assert_eq!(snapshot.latitude, 40.41);
        assert_eq!(snapshot.longitude, -3.70);
    }

    #[tokio::test]
    async fn test_failed_probe_names_capability() {
        let (device, camera, network, mut geolocation) = quiet_mocks();
        geolocation
            .expect_get_current_position()
            .returning(|| Err(BridgeError::PermissionDenied("declined".to_string())));

        let probe = probe_with(device, camera, network, geolocation);
        let error = probe.probe_location_info().await.unwrap_err();

        assert_eq!(error.capability, Capability::Location);
        assert!(matches!(error.source, BridgeError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_probe_is_idempotent() {
        let (mut device, camera, network, geolocation) = quiet_mocks();
        // Each invocation re-queries the service; two calls expected.
        device
            .expect_get_info()
            .times(2)
            .returning(|| Ok(sample_device_info()));

        let probe = probe_with(device, camera, network, geolocation);
        probe.probe_device_info().await.unwrap();
        probe.probe_device_info().await.unwrap();
    }

    #[tokio::test]
    async fn test_record_failure_reaches_sink() {
        use bridge_traits::time::{LogEntry, LogLevel, LoggerSink};
        use std::sync::Mutex;

        #[derive(Default)]
        struct CaptureSink {
            entries: Mutex<Vec<LogEntry>>,
        }

        #[async_trait]
        impl LoggerSink for CaptureSink {
            async fn log(&self, entry: LogEntry) -> BridgeResult<()> {
                self.entries.lock().unwrap().push(entry);
                Ok(())
            }

            fn min_level(&self) -> LogLevel {
                LogLevel::Trace
            }
        }

        let sink = Arc::new(CaptureSink::default());
        let (device, camera, network, geolocation) = quiet_mocks();
        let probe = CapabilityProbe::new(
            Arc::new(device),
            Arc::new(camera),
            Arc::new(network),
            Arc::new(geolocation),
            Arc::new(EventLog::new()),
            Some(sink.clone() as Arc<dyn LoggerSink>),
        );

        let error = ProbeError::new(
            Capability::Device,
            BridgeError::OperationFailed("dmi unreadable".to_string()),
        );
        probe.record_failure(&error).await;

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(
            entries[0].fields.get("capability"),
            Some(&"device".to_string())
        );
    }
}
