//! Camera Implementation

use async_trait::async_trait;
use bridge_traits::{
    camera::{CameraService, Photo, PhotoConfig},
    error::{BridgeError, Result},
};

/// Desktop camera service
///
/// Desktop hosts have no interactive capture surface in this core, so
/// `get_photo` always fails. Availability is a real capability check via
/// capture-device enumeration, overriding the capture-attempt default from
/// the trait.
pub struct DesktopCameraService;

impl DesktopCameraService {
    /// Create a new camera service
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopCameraService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CameraService for DesktopCameraService {
    async fn get_photo(&self, _config: PhotoConfig) -> Result<Photo> {
        Err(BridgeError::NotAvailable(
            "interactive capture requires a host camera UI".to_string(),
        ))
    }

    async fn is_available(&self) -> bool {
        capture_device_present().await
    }
}

#[cfg(target_os = "linux")]
async fn capture_device_present() -> bool {
    let Ok(mut entries) = tokio::fs::read_dir("/dev").await else {
        return false;
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.file_name().to_string_lossy().starts_with("video") {
            return true;
        }
    }

    false
}

#[cfg(not(target_os = "linux"))]
async fn capture_device_present() -> bool {
    false
}
