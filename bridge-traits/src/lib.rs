//! # Host Bridge Traits
//!
//! Capability contracts that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the portable view core and
//! platform-specific implementations. Each trait represents a device
//! capability the core queries or observes but that must be implemented
//! differently per platform (desktop, iOS, Android).
//!
//! ## Traits
//!
//! ### One-shot capability queries
//! - [`DeviceInfoService`](device::DeviceInfoService) - Device identity, OS version, battery state
//! - [`CameraService`](camera::CameraService) - Photo capture and camera availability
//! - [`GeolocationService`](geolocation::GeolocationService) - Current position
//!
//! ### Notification sources
//! - [`NetworkMonitor`](network::NetworkMonitor) - Connectivity status plus a change stream
//! - [`AppLifecycleObserver`](lifecycle::AppLifecycleObserver) - Foreground/background transitions
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured diagnostics to host logging
//!
//! ## Platform Requirements
//!
//! Each supported platform ships concrete adapters for every bridge trait it
//! can honour. Desktop adapters live in `bridge-desktop`; mobile hosts inject
//! adapters backed by their native capability APIs. A platform that cannot
//! honour a capability returns [`BridgeError::NotAvailable`](error::BridgeError)
//! rather than faking a result - the view core treats that as a tolerated
//! probe failure and leaves the corresponding snapshot at its default.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Platform implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Provide actionable error messages
//! - Map user permission refusals to `BridgeError::PermissionDenied`
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Change streams require `Send` only, since each
//! stream is owned by a single consumer task.

pub mod camera;
pub mod device;
pub mod error;
pub mod geolocation;
pub mod lifecycle;
pub mod network;
pub mod time;

pub use camera::CameraService;
pub use device::DeviceInfoService;
pub use error::{BridgeError, Result};
pub use geolocation::GeolocationService;
pub use lifecycle::AppLifecycleObserver;
pub use network::NetworkMonitor;
pub use time::{Clock, LoggerSink, SystemClock};
