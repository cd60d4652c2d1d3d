//! Network Monitoring Abstraction
//!
//! Provides network connectivity and status information.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Network connection type as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// WiFi connection
    Wifi,
    /// Cellular/mobile data connection
    Cellular,
    /// No connection
    None,
    /// Connection type unknown or indeterminate
    Unknown,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionType::Wifi => "wifi",
            ConnectionType::Cellular => "cellular",
            ConnectionType::None => "none",
            ConnectionType::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Current network status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub connected: bool,
    pub connection_type: ConnectionType,
}

/// Network monitor trait
///
/// Provides network connectivity information so the view core can:
/// - Report the current connection type at startup
/// - Follow connectivity transitions for the lifetime of the view
///
/// # Platform Support
///
/// - **Desktop**: Reachability checks plus interface inspection
/// - **iOS**: Network framework, Reachability
/// - **Android**: ConnectivityManager
///
/// # Example
///
/// ```ignore
/// use bridge_traits::network::NetworkMonitor;
///
/// async fn is_on_wifi(monitor: &dyn NetworkMonitor) -> bool {
///     matches!(
///         monitor.get_status().await,
///         Ok(status) if status.connected
///             && status.connection_type == ConnectionType::Wifi
///     )
/// }
/// ```
#[async_trait::async_trait]
pub trait NetworkMonitor: Send + Sync {
    /// Get current network status
    async fn get_status(&self) -> Result<NetworkStatus>;

    /// Check if currently connected to any network
    async fn is_connected(&self) -> bool {
        matches!(
            self.get_status().await,
            Ok(NetworkStatus {
                connected: true,
                ..
            })
        )
    }

    /// Subscribe to network status changes
    ///
    /// Returns a stream of status updates. Implementations should emit an
    /// event whenever connectivity or connection type changes, and deliver
    /// updates serially in the order they were observed.
    async fn subscribe_changes(&self) -> Result<Box<dyn NetworkChangeStream>>;
}

/// Stream of network status changes
#[async_trait::async_trait]
pub trait NetworkChangeStream: Send {
    /// Get the next network status update
    ///
    /// Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<NetworkStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_type_display() {
        assert_eq!(ConnectionType::Wifi.to_string(), "wifi");
        assert_eq!(ConnectionType::Cellular.to_string(), "cellular");
        assert_eq!(ConnectionType::None.to_string(), "none");
        assert_eq!(ConnectionType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_network_status() {
        let status = NetworkStatus {
            connected: true,
            connection_type: ConnectionType::Wifi,
        };

        assert!(status.connected);
        assert_eq!(status.connection_type, ConnectionType::Wifi);
    }
}
