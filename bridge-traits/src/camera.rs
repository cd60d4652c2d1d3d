//! Camera Abstraction
//!
//! Provides photo capture and camera availability checks.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the captured photo is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoResultType {
    /// Base64-encoded image data
    Base64,
    /// Host filesystem URI
    Uri,
}

/// Which capture surface the host should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSource {
    /// Ask the user to choose between camera and photo library
    Prompt,
    /// Open the camera directly
    Camera,
    /// Open the photo library directly
    Photos,
}

/// Capture configuration passed to [`CameraService::get_photo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoConfig {
    /// JPEG quality in `[0, 100]`
    pub quality: u8,
    /// Whether the host should offer an edit step after capture
    pub allow_editing: bool,
    pub result_type: PhotoResultType,
    pub source: PhotoSource,
}

impl PhotoConfig {
    /// Configuration used by the availability probe: medium quality, no edit
    /// step, base64 result, prompt-style source selection.
    pub fn probe() -> Self {
        Self {
            quality: 50,
            allow_editing: false,
            result_type: PhotoResultType::Base64,
            source: PhotoSource::Prompt,
        }
    }
}

/// A captured photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Base64-encoded image data (empty for URI results)
    pub base64_data: String,
    /// Image format (e.g., "jpeg")
    pub format: String,
}

/// Camera service trait
///
/// # Platform Support
///
/// - **Desktop**: Capture-device enumeration only; interactive capture needs a host UI
/// - **iOS**: AVFoundation / UIImagePickerController
/// - **Android**: CameraX / ACTION_IMAGE_CAPTURE
///
/// # Availability
///
/// `is_available` ships a default implementation that attempts a capture with
/// the probe configuration and treats any error as "unavailable". That
/// inference cannot distinguish a user declining the prompt from missing
/// hardware, so adapters should override it with a real capability check
/// whenever the platform exposes one.
#[async_trait::async_trait]
pub trait CameraService: Send + Sync {
    /// Open the host capture flow and return the resulting photo
    ///
    /// Errors cover missing hardware ([`BridgeError::NotAvailable`]),
    /// permission refusal ([`BridgeError::PermissionDenied`]) and user
    /// cancellation where the platform surfaces it as an error.
    ///
    /// [`BridgeError::NotAvailable`]: crate::error::BridgeError::NotAvailable
    /// [`BridgeError::PermissionDenied`]: crate::error::BridgeError::PermissionDenied
    async fn get_photo(&self, config: PhotoConfig) -> Result<Photo>;

    /// Whether a camera can be used on this host
    async fn is_available(&self) -> bool {
        self.get_photo(PhotoConfig::probe()).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    struct NoCamera;

    #[async_trait::async_trait]
    impl CameraService for NoCamera {
        async fn get_photo(&self, _config: PhotoConfig) -> Result<Photo> {
            Err(BridgeError::NotAvailable("no capture device".to_string()))
        }
    }

    #[test]
    fn test_probe_config() {
        let config = PhotoConfig::probe();
        assert_eq!(config.quality, 50);
        assert!(!config.allow_editing);
        assert_eq!(config.result_type, PhotoResultType::Base64);
        assert_eq!(config.source, PhotoSource::Prompt);
    }

    #[tokio::test]
    async fn test_default_availability_maps_errors_to_false() {
        let camera = NoCamera;
        assert!(!camera.is_available().await);
    }
}
