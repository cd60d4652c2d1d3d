//! Long-lived notification subscriptions.
//!
//! Two external streams feed the view for its whole lifetime: network
//! status changes and app lifecycle transitions. Each stream gets a
//! forwarder task that pumps notifications into a single channel; one
//! driver task consumes the channel and applies handlers one at a time, so
//! handler executions never interleave with each other.

use std::sync::Arc;

use bridge_traits::lifecycle::{AppLifecycleObserver, LifecycleEvent};
use bridge_traits::network::{NetworkMonitor, NetworkStatus};
use core_runtime::events::{EventBus, LifecycleNotice, NetworkEvent, ViewEvent};
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::log::EventLog;
use crate::snapshot::{NetworkSnapshot, ViewState};

const NOTIFICATION_BUFFER: usize = 64;

/// A notification pulled off one of the external streams.
#[derive(Debug, Clone, Copy)]
enum ViewNotification {
    Network(NetworkStatus),
    Lifecycle(LifecycleEvent),
}

/// Handles to the running subscription tasks.
///
/// Owns one forwarder task per stream plus the driver task. Dropping the
/// set aborts all of them; [`close`] does the same explicitly so hosts can
/// release the subscriptions when the view is discarded.
///
/// [`close`]: SubscriptionSet::close
pub struct SubscriptionSet {
    forwarders: Vec<JoinHandle<()>>,
    driver: Option<JoinHandle<()>>,
}

impl SubscriptionSet {
    /// Subscribe to both streams and start the handler tasks.
    ///
    /// A stream that cannot be subscribed (e.g., the bridge reports
    /// `NotAvailable`) is recorded and skipped; the other stream still
    /// runs. This never fails overall.
    pub(crate) async fn activate(
        network: &dyn NetworkMonitor,
        lifecycle: &dyn AppLifecycleObserver,
        state: Arc<RwLock<ViewState>>,
        log: Arc<EventLog>,
        bus: EventBus,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<ViewNotification>(NOTIFICATION_BUFFER);
        let mut forwarders = Vec::with_capacity(2);

        match network.subscribe_changes().await {
            Ok(mut stream) => {
                let tx = tx.clone();
                forwarders.push(tokio::spawn(async move {
                    while let Some(status) = stream.next().await {
                        if tx.send(ViewNotification::Network(status)).await.is_err() {
                            break;
                        }
                    }
                }));
            }
            Err(error) => {
                warn!(%error, "Network change subscription unavailable");
            }
        }

        match lifecycle.subscribe_changes().await {
            Ok(mut stream) => {
                let tx = tx.clone();
                forwarders.push(tokio::spawn(async move {
                    while let Some(event) = stream.next().await {
                        if tx.send(ViewNotification::Lifecycle(event)).await.is_err() {
                            break;
                        }
                    }
                }));
            }
            Err(error) => {
                warn!(%error, "Lifecycle subscription unavailable");
            }
        }

        drop(tx);
        let driver = tokio::spawn(Self::drive(rx, state, log, bus));

        Self {
            forwarders,
            driver: Some(driver),
        }
    }

    /// Single consumer loop: one handler at a time, each to completion.
    async fn drive(
        mut rx: mpsc::Receiver<ViewNotification>,
        state: Arc<RwLock<ViewState>>,
        log: Arc<EventLog>,
        bus: EventBus,
    ) {
        while let Some(notification) = rx.recv().await {
            match notification {
                ViewNotification::Network(status) => {
                    {
                        let mut state = state.write().await;
                        // Whole-record overwrite: last notification wins.
                        state.network = NetworkSnapshot::from(status);
                    }
                    log.append(format!(
                        "Connection type changed to {}",
                        status.connection_type
                    ));
                    bus.emit(ViewEvent::Network(NetworkEvent::StatusChanged {
                        connected: status.connected,
                        connection_type: status.connection_type,
                    }))
                    .ok();
                }
                ViewNotification::Lifecycle(event) => {
                    let (entry, notice) = match event {
                        LifecycleEvent::StateChanged { is_active: true } => {
                            ("onStart", LifecycleNotice::Started)
                        }
                        LifecycleEvent::StateChanged { is_active: false } => {
                            ("onStop", LifecycleNotice::Stopped)
                        }
                        LifecycleEvent::Resumed => ("onResume", LifecycleNotice::Resumed),
                        LifecycleEvent::Paused => ("onPause", LifecycleNotice::Paused),
                    };
                    log.append(entry);
                    bus.emit(ViewEvent::Lifecycle(notice)).ok();
                }
            }
        }
    }

    /// Release both subscriptions and stop the handler tasks.
    pub fn close(&mut self) {
        for task in self.forwarders.drain(..) {
            task.abort();
        }
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }

    /// Whether any stream subscription is still held.
    ///
    /// Counts only the stream forwarders; the driver task alone (both
    /// subscriptions refused) does not make the set active.
    pub fn is_active(&self) -> bool {
        !self.forwarders.is_empty()
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::lifecycle::{AppState, LifecycleEventStream};
    use bridge_traits::network::{ConnectionType, NetworkChangeStream};
    use std::time::Duration;

    struct ScriptedNetwork {
        rx: std::sync::Mutex<Option<mpsc::Receiver<NetworkStatus>>>,
    }

    impl ScriptedNetwork {
        fn new() -> (Self, mpsc::Sender<NetworkStatus>) {
            let (tx, rx) = mpsc::channel(16);
            (
                Self {
                    rx: std::sync::Mutex::new(Some(rx)),
                },
                tx,
            )
        }
    }

    #[async_trait]
    impl NetworkMonitor for ScriptedNetwork {
        async fn get_status(&self) -> BridgeResult<NetworkStatus> {
            Ok(NetworkStatus {
                connected: true,
                connection_type: ConnectionType::Wifi,
            })
        }

        async fn subscribe_changes(&self) -> BridgeResult<Box<dyn NetworkChangeStream>> {
            let rx = self
                .rx
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| BridgeError::OperationFailed("already subscribed".to_string()))?;
            Ok(Box::new(ChannelNetworkStream { rx }))
        }
    }

    struct ChannelNetworkStream {
        rx: mpsc::Receiver<NetworkStatus>,
    }

    #[async_trait]
    impl NetworkChangeStream for ChannelNetworkStream {
        async fn next(&mut self) -> Option<NetworkStatus> {
            self.rx.recv().await
        }
    }

    struct ScriptedLifecycle {
        rx: std::sync::Mutex<Option<mpsc::Receiver<LifecycleEvent>>>,
    }

    impl ScriptedLifecycle {
        fn new() -> (Self, mpsc::Sender<LifecycleEvent>) {
            let (tx, rx) = mpsc::channel(16);
            (
                Self {
                    rx: std::sync::Mutex::new(Some(rx)),
                },
                tx,
            )
        }
    }

    #[async_trait]
    impl AppLifecycleObserver for ScriptedLifecycle {
        async fn get_state(&self) -> BridgeResult<AppState> {
            Ok(AppState { is_active: true })
        }

        async fn subscribe_changes(&self) -> BridgeResult<Box<dyn LifecycleEventStream>> {
            let rx = self
                .rx
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| BridgeError::OperationFailed("already subscribed".to_string()))?;
            Ok(Box::new(ChannelLifecycleStream { rx }))
        }
    }

    struct ChannelLifecycleStream {
        rx: mpsc::Receiver<LifecycleEvent>,
    }

    #[async_trait]
    impl LifecycleEventStream for ChannelLifecycleStream {
        async fn next(&mut self) -> Option<LifecycleEvent> {
            self.rx.recv().await
        }
    }

    async fn wait_for_log_len(log: &EventLog, expected: usize) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while log.len() < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("log did not reach expected length in time");
    }

    fn status(connection_type: ConnectionType) -> NetworkStatus {
        NetworkStatus {
            connected: connection_type != ConnectionType::None,
            connection_type,
        }
    }

    #[tokio::test]
    async fn test_network_notifications_are_ordered_and_last_write_wins() {
        let (network, net_tx) = ScriptedNetwork::new();
        let (lifecycle, _life_tx) = ScriptedLifecycle::new();
        let state = Arc::new(RwLock::new(ViewState::default()));
        let log = Arc::new(EventLog::new());
        let bus = EventBus::new(16);

        let mut set = SubscriptionSet::activate(
            &network,
            &lifecycle,
            Arc::clone(&state),
            Arc::clone(&log),
            bus,
        )
        .await;

        for connection_type in [
            ConnectionType::Wifi,
            ConnectionType::Cellular,
            ConnectionType::None,
        ] {
            net_tx.send(status(connection_type)).await.unwrap();
        }
        wait_for_log_len(&log, 3).await;

        assert_eq!(
            log.entries(),
            vec![
                "Connection type changed to wifi",
                "Connection type changed to cellular",
                "Connection type changed to none",
            ]
        );

        let state = state.read().await;
        assert_eq!(state.network.connection_type, ConnectionType::None);
        assert!(!state.network.is_connected);

        drop(state);
        set.close();
    }

    #[tokio::test]
    async fn test_lifecycle_notifications_map_to_log_entries() {
        let (network, _net_tx) = ScriptedNetwork::new();
        let (lifecycle, life_tx) = ScriptedLifecycle::new();
        let state = Arc::new(RwLock::new(ViewState::default()));
        let log = Arc::new(EventLog::new());
        let bus = EventBus::new(16);

        let _set = SubscriptionSet::activate(
            &network,
            &lifecycle,
            Arc::clone(&state),
            Arc::clone(&log),
            bus,
        )
        .await;

        life_tx
            .send(LifecycleEvent::StateChanged { is_active: true })
            .await
            .unwrap();
        life_tx.send(LifecycleEvent::Paused).await.unwrap();
        life_tx.send(LifecycleEvent::Resumed).await.unwrap();
        life_tx
            .send(LifecycleEvent::StateChanged { is_active: false })
            .await
            .unwrap();
        wait_for_log_len(&log, 4).await;

        assert_eq!(
            log.entries(),
            vec!["onStart", "onPause", "onResume", "onStop"]
        );
    }

    #[tokio::test]
    async fn test_events_are_published_to_the_bus() {
        let (network, net_tx) = ScriptedNetwork::new();
        let (lifecycle, _life_tx) = ScriptedLifecycle::new();
        let state = Arc::new(RwLock::new(ViewState::default()));
        let log = Arc::new(EventLog::new());
        let bus = EventBus::new(16);
        let mut events = bus.subscribe();

        let _set = SubscriptionSet::activate(
            &network,
            &lifecycle,
            Arc::clone(&state),
            Arc::clone(&log),
            bus,
        )
        .await;

        net_tx.send(status(ConnectionType::Cellular)).await.unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            ViewEvent::Network(NetworkEvent::StatusChanged {
                connected: true,
                connection_type: ConnectionType::Cellular,
            })
        );
    }

    #[tokio::test]
    async fn test_failed_subscription_is_skipped_not_fatal() {
        struct NoStreams;

        #[async_trait]
        impl NetworkMonitor for NoStreams {
            async fn get_status(&self) -> BridgeResult<NetworkStatus> {
                Ok(NetworkStatus {
                    connected: false,
                    connection_type: ConnectionType::None,
                })
            }

            async fn subscribe_changes(&self) -> BridgeResult<Box<dyn NetworkChangeStream>> {
                Err(BridgeError::NotAvailable("no watcher".to_string()))
            }
        }

        let (lifecycle, life_tx) = ScriptedLifecycle::new();
        let state = Arc::new(RwLock::new(ViewState::default()));
        let log = Arc::new(EventLog::new());

        let _set = SubscriptionSet::activate(
            &NoStreams,
            &lifecycle,
            Arc::clone(&state),
            Arc::clone(&log),
            EventBus::new(16),
        )
        .await;

        // The lifecycle stream still works.
        life_tx.send(LifecycleEvent::Resumed).await.unwrap();
        wait_for_log_len(&log, 1).await;
        assert_eq!(log.entries(), vec!["onResume"]);
    }

    #[tokio::test]
    async fn test_no_streams_at_all_means_inactive() {
        struct Refusing;

        #[async_trait]
        impl NetworkMonitor for Refusing {
            async fn get_status(&self) -> BridgeResult<NetworkStatus> {
                Ok(NetworkStatus {
                    connected: false,
                    connection_type: ConnectionType::None,
                })
            }

            async fn subscribe_changes(&self) -> BridgeResult<Box<dyn NetworkChangeStream>> {
                Err(BridgeError::NotAvailable("no watcher".to_string()))
            }
        }

        #[async_trait]
        impl AppLifecycleObserver for Refusing {
            async fn get_state(&self) -> BridgeResult<AppState> {
                Ok(AppState { is_active: true })
            }

            async fn subscribe_changes(&self) -> BridgeResult<Box<dyn LifecycleEventStream>> {
                Err(BridgeError::NotAvailable("no callbacks".to_string()))
            }
        }

        let set = SubscriptionSet::activate(
            &Refusing,
            &Refusing,
            Arc::new(RwLock::new(ViewState::default())),
            Arc::new(EventLog::new()),
            EventBus::new(16),
        )
        .await;

        // Only the idle driver remains; no live subscription to report.
        assert!(!set.is_active());
    }

    #[tokio::test]
    async fn test_close_stops_delivery() {
        let (network, net_tx) = ScriptedNetwork::new();
        let (lifecycle, _life_tx) = ScriptedLifecycle::new();
        let state = Arc::new(RwLock::new(ViewState::default()));
        let log = Arc::new(EventLog::new());

        let mut set = SubscriptionSet::activate(
            &network,
            &lifecycle,
            Arc::clone(&state),
            Arc::clone(&log),
            EventBus::new(16),
        )
        .await;

        assert!(set.is_active());
        set.close();
        assert!(!set.is_active());

        // Notifications after close never reach the log.
        net_tx.send(status(ConnectionType::Wifi)).await.ok();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(log.is_empty());
    }
}
