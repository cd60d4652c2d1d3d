//! # Event Bus System
//!
//! Provides an event-driven architecture for the device panel core using
//! `tokio::sync::broadcast`. Host shells subscribe to the bus to re-render
//! when the view state changes; the view core publishes typed events as the
//! probes complete and as notifications arrive.
//!
//! ## Usage
//!
//! ### Creating an Event Bus
//!
//! ```rust
//! use core_runtime::events::EventBus;
//!
//! let event_bus = EventBus::new(100); // Buffer size of 100 events
//! ```
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, LifecycleNotice, ViewEvent};
//!
//! # let event_bus = EventBus::new(100);
//! event_bus
//!     .emit(ViewEvent::Lifecycle(LifecycleNotice::Resumed))
//!     .ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, ViewEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => {
//!                 eprintln!("Missed {} events", n);
//!             }
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The bus uses `tokio::sync::broadcast`, which can produce two errors:
//!
//! - **`RecvError::Lagged(n)`**: the subscriber was too slow and missed `n`
//!   events. Non-fatal; the subscriber keeps receiving new events.
//! - **`RecvError::Closed`**: all senders dropped; treat as shutdown.
//!
//! ## Thread Safety
//!
//! The event bus is fully thread-safe (`Send + Sync`) and can be shared
//! across async tasks with `Arc`.

use bridge_traits::network::ConnectionType;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Balances memory usage with the ability to absorb notification bursts.
/// Subscribers that can't keep up receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// View Event Types
// ============================================================================

/// Top-level event enum published through the bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum ViewEvent {
    /// The probe sequence finished and subscriptions are live
    Initialized,
    /// A capability probe completed or was tolerated as failed
    Probe(ProbeEvent),
    /// Network connectivity changed
    Network(NetworkEvent),
    /// App lifecycle transition
    Lifecycle(LifecycleNotice),
}

impl ViewEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            ViewEvent::Initialized => "View initialization complete",
            ViewEvent::Probe(e) => e.description(),
            ViewEvent::Network(e) => e.description(),
            ViewEvent::Lifecycle(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            ViewEvent::Probe(ProbeEvent::Failed { .. }) => EventSeverity::Warning,
            ViewEvent::Initialized => EventSeverity::Info,
            ViewEvent::Network(_) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Capability / Probe Events
// ============================================================================

/// The capabilities the probe sequence queries, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Platform,
    Camera,
    Device,
    Battery,
    Network,
    Location,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Capability::Platform => "platform",
            Capability::Camera => "camera",
            Capability::Device => "device",
            Capability::Battery => "battery",
            Capability::Network => "network",
            Capability::Location => "location",
        };
        f.write_str(label)
    }
}

/// Events related to the one-shot capability probes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ProbeEvent {
    /// Probe completed and its snapshot was written.
    Completed {
        /// The capability that was probed.
        capability: Capability,
    },
    /// Probe failed; the snapshot keeps its default value.
    Failed {
        /// The capability that was probed.
        capability: Capability,
        /// Human-readable failure message.
        message: String,
    },
}

impl ProbeEvent {
    fn description(&self) -> &str {
        match self {
            ProbeEvent::Completed { .. } => "Capability probe completed",
            ProbeEvent::Failed { .. } => "Capability probe failed",
        }
    }
}

// ============================================================================
// Network Events
// ============================================================================

/// Events related to network connectivity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum NetworkEvent {
    /// The network status was overwritten by a change notification.
    StatusChanged {
        /// Whether any network is reachable.
        connected: bool,
        /// The new connection type.
        connection_type: ConnectionType,
    },
}

impl NetworkEvent {
    fn description(&self) -> &str {
        match self {
            NetworkEvent::StatusChanged { .. } => "Network status changed",
        }
    }
}

// ============================================================================
// Lifecycle Events
// ============================================================================

/// App lifecycle transitions surfaced to the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum LifecycleNotice {
    /// App became active
    Started,
    /// App became inactive
    Stopped,
    /// App returned to the foreground
    Resumed,
    /// App is about to move to the background
    Paused,
}

impl LifecycleNotice {
    fn description(&self) -> &str {
        match self {
            LifecycleNotice::Started => "App became active",
            LifecycleNotice::Stopped => "App became inactive",
            LifecycleNotice::Resumed => "App resumed",
            LifecycleNotice::Paused => "App paused",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for view events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ViewEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events buffered per subscriber.
    ///   When a subscriber falls behind by more than this amount, it will
    ///   receive a `RecvError::Lagged` error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event.
    /// Returns an error if there are no active subscribers.
    pub fn emit(&self, event: ViewEvent) -> Result<usize, SendError<ViewEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Each call creates an independent receiver that will receive all
    /// future events. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<ViewEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_creation() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_bus_subscription() {
        let bus = EventBus::new(10);
        let _sub1 = bus.subscribe();
        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);

        // Should error when no subscribers
        assert!(bus.emit(ViewEvent::Initialized).is_err());
    }

    #[tokio::test]
    async fn test_event_emission_with_subscribers() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        let event = ViewEvent::Network(NetworkEvent::StatusChanged {
            connected: true,
            connection_type: ConnectionType::Wifi,
        });

        let result = bus.emit(event.clone());
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 1);

        let received = sub.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = ViewEvent::Probe(ProbeEvent::Failed {
            capability: Capability::Location,
            message: "no positioning source".to_string(),
        });

        bus.emit(event.clone()).unwrap();

        assert_eq!(sub1.recv().await.unwrap(), event);
        assert_eq!(sub2.recv().await.unwrap(), event);
    }

    #[test]
    fn test_event_severity() {
        let failed = ViewEvent::Probe(ProbeEvent::Failed {
            capability: Capability::Battery,
            message: "unreadable".to_string(),
        });
        assert_eq!(failed.severity(), EventSeverity::Warning);
        assert_eq!(ViewEvent::Initialized.severity(), EventSeverity::Info);
        assert_eq!(
            ViewEvent::Lifecycle(LifecycleNotice::Paused).severity(),
            EventSeverity::Debug
        );
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let event = ViewEvent::Network(NetworkEvent::StatusChanged {
            connected: false,
            connection_type: ConnectionType::None,
        });

        let json = serde_json::to_string(&event).unwrap();
        let back: ViewEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
