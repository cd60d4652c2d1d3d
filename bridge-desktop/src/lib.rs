//! # Desktop Bridge Implementations
//!
//! Default implementations of the capability bridge traits for desktop
//! platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides best-effort implementations of the bridge traits using
//! desktop-appropriate sources:
//! - `DeviceInfoService` using the `sysinfo` crate plus DMI/power-supply
//!   inspection on Linux
//! - `NetworkMonitor` using reachability checks and interface inspection
//! - `CameraService` using capture-device enumeration (no interactive capture)
//! - `GeolocationService` as unavailable (desktops carry no positioning source)
//! - `AppLifecycleObserver` as always-foreground (desktop apps do not background)
//!
//! Adapters that cannot honour a capability return
//! `BridgeError::NotAvailable` so the view core can fall back to default
//! snapshot values instead of failing initialization.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopNetworkMonitor, SysinfoDeviceService};
//! use bridge_traits::{DeviceInfoService, NetworkMonitor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let device = SysinfoDeviceService::new();
//!     let network = DesktopNetworkMonitor::new();
//!
//!     // Inject into the view configuration
//! }
//! ```

mod camera;
mod device;
mod geolocation;
mod lifecycle;
mod network;

pub use camera::DesktopCameraService;
pub use device::SysinfoDeviceService;
pub use geolocation::DesktopGeolocationService;
pub use lifecycle::DesktopLifecycleObserver;
pub use network::DesktopNetworkMonitor;
