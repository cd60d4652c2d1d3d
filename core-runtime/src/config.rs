//! # View Configuration Module
//!
//! Provides configuration management for the device panel core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `ViewConfig` instance that holds every capability bridge the view core
//! depends on. It enforces fail-fast validation so a missing bridge is
//! reported at construction time with an actionable message, not as a hang
//! or panic during the probe sequence.
//!
//! ## Bridge Resolution
//!
//! Every capability bridge is injectable. When the `desktop-shims` feature is
//! enabled, desktop-ready defaults from `bridge-desktop` are injected for any
//! bridge not provided; without the feature, all capability bridges are
//! required. The clock always defaults to [`SystemClock`] and the diagnostics
//! sink is optional.
//!
//! ## Usage
//!
//! ### Desktop Defaults
//!
//! ```ignore
//! use core_runtime::config::ViewConfig;
//!
//! let config = ViewConfig::builder()
//!     .build()
//!     .expect("desktop-shims supplies every bridge");
//! ```
//!
//! ### Custom Bridges
//!
//! ```ignore
//! use core_runtime::config::ViewConfig;
//! use std::sync::Arc;
//!
//! let config = ViewConfig::builder()
//!     .device_info(Arc::new(MyDeviceService))
//!     .camera(Arc::new(MyCameraService))
//!     .network_monitor(Arc::new(MyNetworkMonitor))
//!     .geolocation(Arc::new(MyGeolocationService))
//!     .lifecycle_observer(Arc::new(MyLifecycleObserver))
//!     .event_buffer_size(256)
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{
    camera::CameraService, device::DeviceInfoService, geolocation::GeolocationService,
    lifecycle::AppLifecycleObserver, network::NetworkMonitor, time::SystemClock, Clock, LoggerSink,
};
use std::sync::Arc;

/// Configuration for the device panel view core.
///
/// Holds all capability bridges and settings required to construct the view.
/// Use [`ViewConfigBuilder`] to create instances.
#[derive(Clone)]
pub struct ViewConfig {
    /// Device identity and battery queries
    pub device_info: Arc<dyn DeviceInfoService>,

    /// Photo capture / camera availability
    pub camera: Arc<dyn CameraService>,

    /// Connectivity status and change notifications
    pub network_monitor: Arc<dyn NetworkMonitor>,

    /// Position queries
    pub geolocation: Arc<dyn GeolocationService>,

    /// App foreground/background notifications
    pub lifecycle_observer: Arc<dyn AppLifecycleObserver>,

    /// Time source (defaults to the system clock)
    pub clock: Arc<dyn Clock>,

    /// Optional diagnostic sink mirroring probe failures and log entries
    pub diagnostics: Option<Arc<dyn LoggerSink>>,

    /// Buffer size for the view event bus
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for ViewConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewConfig")
            .field("device_info", &"DeviceInfoService { ... }")
            .field("camera", &"CameraService { ... }")
            .field("network_monitor", &"NetworkMonitor { ... }")
            .field("geolocation", &"GeolocationService { ... }")
            .field("lifecycle_observer", &"AppLifecycleObserver { ... }")
            .field("clock", &"Clock { ... }")
            .field(
                "diagnostics",
                &self.diagnostics.as_ref().map(|_| "LoggerSink { ... }"),
            )
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl ViewConfig {
    /// Creates a new builder for constructing a `ViewConfig`.
    pub fn builder() -> ViewConfigBuilder {
        ViewConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer_size > 65_536 {
            return Err(Error::Config(
                "Event buffer size exceeds maximum of 65536".to_string(),
            ));
        }

        Ok(())
    }
}

fn capability_missing(capability: &str, hint: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "{capability} implementation is required. \
             Desktop: enable the 'desktop-shims' feature to use the default {hint}. \
             Mobile: inject a platform-native adapter."
        ),
    }
}

#[cfg(feature = "desktop-shims")]
fn default_device_info() -> Result<Arc<dyn DeviceInfoService>> {
    Ok(Arc::new(bridge_desktop::SysinfoDeviceService::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_device_info() -> Result<Arc<dyn DeviceInfoService>> {
    Err(capability_missing("DeviceInfoService", "SysinfoDeviceService"))
}

#[cfg(feature = "desktop-shims")]
fn default_camera() -> Result<Arc<dyn CameraService>> {
    Ok(Arc::new(bridge_desktop::DesktopCameraService::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_camera() -> Result<Arc<dyn CameraService>> {
    Err(capability_missing("CameraService", "DesktopCameraService"))
}

#[cfg(feature = "desktop-shims")]
fn default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    Ok(Arc::new(bridge_desktop::DesktopNetworkMonitor::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    Err(capability_missing("NetworkMonitor", "DesktopNetworkMonitor"))
}

#[cfg(feature = "desktop-shims")]
fn default_geolocation() -> Result<Arc<dyn GeolocationService>> {
    Ok(Arc::new(bridge_desktop::DesktopGeolocationService::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_geolocation() -> Result<Arc<dyn GeolocationService>> {
    Err(capability_missing(
        "GeolocationService",
        "DesktopGeolocationService",
    ))
}

#[cfg(feature = "desktop-shims")]
fn default_lifecycle_observer() -> Result<Arc<dyn AppLifecycleObserver>> {
    Ok(Arc::new(bridge_desktop::DesktopLifecycleObserver::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_lifecycle_observer() -> Result<Arc<dyn AppLifecycleObserver>> {
    Err(capability_missing(
        "AppLifecycleObserver",
        "DesktopLifecycleObserver",
    ))
}

/// Builder for [`ViewConfig`].
///
/// Incrementally set bridges and settings, then call [`build`]. The builder
/// validates required dependencies and provides actionable error messages
/// when a capability is missing.
///
/// [`build`]: ViewConfigBuilder::build
#[derive(Default)]
pub struct ViewConfigBuilder {
    device_info: Option<Arc<dyn DeviceInfoService>>,
    camera: Option<Arc<dyn CameraService>>,
    network_monitor: Option<Arc<dyn NetworkMonitor>>,
    geolocation: Option<Arc<dyn GeolocationService>>,
    lifecycle_observer: Option<Arc<dyn AppLifecycleObserver>>,
    clock: Option<Arc<dyn Clock>>,
    diagnostics: Option<Arc<dyn LoggerSink>>,
    event_buffer_size: Option<usize>,
}

impl ViewConfigBuilder {
    /// Set the device information service.
    pub fn device_info(mut self, service: Arc<dyn DeviceInfoService>) -> Self {
        self.device_info = Some(service);
        self
    }

    /// Set the camera service.
    pub fn camera(mut self, service: Arc<dyn CameraService>) -> Self {
        self.camera = Some(service);
        self
    }

    /// Set the network monitor.
    pub fn network_monitor(mut self, monitor: Arc<dyn NetworkMonitor>) -> Self {
        self.network_monitor = Some(monitor);
        self
    }

    /// Set the geolocation service.
    pub fn geolocation(mut self, service: Arc<dyn GeolocationService>) -> Self {
        self.geolocation = Some(service);
        self
    }

    /// Set the app lifecycle observer.
    pub fn lifecycle_observer(mut self, observer: Arc<dyn AppLifecycleObserver>) -> Self {
        self.lifecycle_observer = Some(observer);
        self
    }

    /// Set the time source.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the diagnostic sink.
    pub fn diagnostics(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Set the event bus buffer size.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Build the configuration, injecting platform defaults where available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] for any bridge that was neither
    /// provided nor covered by a platform default, and [`Error::Config`] when
    /// a setting fails validation.
    pub fn build(self) -> Result<ViewConfig> {
        let config = ViewConfig {
            device_info: match self.device_info {
                Some(service) => service,
                None => default_device_info()?,
            },
            camera: match self.camera {
                Some(service) => service,
                None => default_camera()?,
            },
            network_monitor: match self.network_monitor {
                Some(monitor) => monitor,
                None => default_network_monitor()?,
            },
            geolocation: match self.geolocation {
                Some(service) => service,
                None => default_geolocation()?,
            },
            lifecycle_observer: match self.lifecycle_observer {
                Some(observer) => observer,
                None => default_lifecycle_observer()?,
            },
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            diagnostics: self.diagnostics,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}
