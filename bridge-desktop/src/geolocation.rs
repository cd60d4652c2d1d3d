//! Geolocation Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    geolocation::{GeolocationService, Position},
};

/// Desktop geolocation service (unavailable).
///
/// Desktops carry no positioning hardware and this core does not call out to
/// IP-geolocation services, so every query fails with `NotAvailable`. The
/// view core tolerates the failure and leaves the location snapshot unset.
pub struct DesktopGeolocationService;

impl DesktopGeolocationService {
    /// Create a new geolocation service
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopGeolocationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeolocationService for DesktopGeolocationService {
    async fn get_current_position(&self) -> Result<Position> {
        Err(BridgeError::NotAvailable(
            "no positioning source on this host".to_string(),
        ))
    }
}
