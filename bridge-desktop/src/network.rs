//! Network Monitoring Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    network::{ConnectionType, NetworkChangeStream, NetworkMonitor, NetworkStatus},
};
use tracing::debug;

/// Desktop network monitor implementation
///
/// Connectivity is determined with a short TCP reachability check; the
/// connection type is inferred from the names of the interfaces that are up
/// (`wl*` wireless, `ww*` wireless WAN). Platform-specific watchers (Linux
/// netlink, macOS SystemConfiguration, Windows Network List Manager) would be
/// more precise but require additional dependencies, so the change stream
/// polls instead.
pub struct DesktopNetworkMonitor;

impl DesktopNetworkMonitor {
    /// Create a new network monitor
    pub fn new() -> Self {
        Self
    }

    async fn check_connectivity(&self) -> bool {
        matches!(
            tokio::time::timeout(
                std::time::Duration::from_secs(5),
                tokio::net::TcpStream::connect("8.8.8.8:53"),
            )
            .await,
            Ok(Ok(_))
        )
    }
}

impl Default for DesktopNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkMonitor for DesktopNetworkMonitor {
    async fn get_status(&self) -> Result<NetworkStatus> {
        let connected = self.check_connectivity().await;

        let status = NetworkStatus {
            connected,
            connection_type: if connected {
                active_interface_type().await
            } else {
                ConnectionType::None
            },
        };

        debug!(connected = status.connected, connection_type = %status.connection_type, "Network status updated");
        Ok(status)
    }

    async fn subscribe_changes(&self) -> Result<Box<dyn NetworkChangeStream>> {
        Ok(Box::new(PollingNetworkChangeStream {
            monitor: Self::new(),
            last_status: None,
        }))
    }
}

/// Infer the connection type from interfaces that are up.
#[cfg(target_os = "linux")]
async fn active_interface_type() -> ConnectionType {
    let Ok(mut entries) = tokio::fs::read_dir("/sys/class/net").await else {
        return ConnectionType::Unknown;
    };

    let mut inferred = ConnectionType::Unknown;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "lo" {
            continue;
        }

        let operstate = tokio::fs::read_to_string(entry.path().join("operstate"))
            .await
            .unwrap_or_default();
        if operstate.trim() != "up" {
            continue;
        }

        if name.starts_with("wl") {
            // Wireless LAN wins over an ambiguous wired guess.
            return ConnectionType::Wifi;
        }
        if name.starts_with("ww") {
            inferred = ConnectionType::Cellular;
        }
    }

    inferred
}

#[cfg(not(target_os = "linux"))]
async fn active_interface_type() -> ConnectionType {
    // Distinguishing WiFi from wired needs platform-specific APIs.
    ConnectionType::Unknown
}

/// Network change stream that polls for status transitions
struct PollingNetworkChangeStream {
    monitor: DesktopNetworkMonitor,
    last_status: Option<NetworkStatus>,
}

#[async_trait]
impl NetworkChangeStream for PollingNetworkChangeStream {
    async fn next(&mut self) -> Option<NetworkStatus> {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;

            if let Ok(status) = self.monitor.get_status().await {
                if self.last_status != Some(status) {
                    self.last_status = Some(status);
                    return Some(status);
                }
            }
        }
    }
}
