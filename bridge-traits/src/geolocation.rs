//! Geolocation Abstraction

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A geographic position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in metres, when the platform reports one
    pub accuracy: Option<f64>,
}

/// Geolocation service trait
///
/// # Platform Support
///
/// - **Desktop**: Usually unavailable (no positioning hardware)
/// - **iOS**: CoreLocation
/// - **Android**: FusedLocationProvider
///
/// Position fixes may take several seconds on mobile hardware; callers await
/// the result and must tolerate [`BridgeError::PermissionDenied`] when the
/// user refuses the location prompt.
///
/// [`BridgeError::PermissionDenied`]: crate::error::BridgeError::PermissionDenied
#[async_trait::async_trait]
pub trait GeolocationService: Send + Sync {
    /// Query the current position
    async fn get_current_position(&self) -> Result<Position>;
}
