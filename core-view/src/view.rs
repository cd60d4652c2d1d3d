//! The capability view: probe sequencing, state, and subscriptions.

use std::sync::Arc;

use bridge_traits::camera::CameraService;
use bridge_traits::device::DeviceInfoService;
use bridge_traits::geolocation::GeolocationService;
use bridge_traits::lifecycle::AppLifecycleObserver;
use bridge_traits::network::NetworkMonitor;
use bridge_traits::time::{Clock, LoggerSink, SystemClock};
use core_runtime::config::ViewConfig;
use core_runtime::events::{Capability, EventBus, ProbeEvent, ViewEvent, DEFAULT_EVENT_BUFFER_SIZE};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, instrument};

use crate::error::{ProbeError, Result, ViewError};
use crate::log::EventLog;
use crate::probe::CapabilityProbe;
use crate::snapshot::{ViewPhase, ViewState};
use crate::subscriptions::SubscriptionSet;

/// The capability bridges and services a [`CapabilityView`] runs against.
#[derive(Clone)]
pub struct ViewDependencies {
    pub device_info: Arc<dyn DeviceInfoService>,
    pub camera: Arc<dyn CameraService>,
    pub network_monitor: Arc<dyn NetworkMonitor>,
    pub geolocation: Arc<dyn GeolocationService>,
    pub lifecycle_observer: Arc<dyn AppLifecycleObserver>,
    pub clock: Arc<dyn Clock>,
    pub diagnostics: Option<Arc<dyn LoggerSink>>,
}

impl ViewDependencies {
    pub fn new(
        device_info: Arc<dyn DeviceInfoService>,
        camera: Arc<dyn CameraService>,
        network_monitor: Arc<dyn NetworkMonitor>,
        geolocation: Arc<dyn GeolocationService>,
        lifecycle_observer: Arc<dyn AppLifecycleObserver>,
    ) -> Self {
        Self {
            device_info,
            camera,
            network_monitor,
            geolocation,
            lifecycle_observer,
            clock: Arc::new(SystemClock),
            diagnostics: None,
        }
    }

    /// Replace the time source, useful for deterministic tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach a diagnostic sink that receives tolerated probe failures.
    pub fn with_diagnostics(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }
}

impl From<ViewConfig> for ViewDependencies {
    fn from(config: ViewConfig) -> Self {
        Self {
            device_info: config.device_info,
            camera: config.camera,
            network_monitor: config.network_monitor,
            geolocation: config.geolocation,
            lifecycle_observer: config.lifecycle_observer,
            clock: config.clock,
            diagnostics: config.diagnostics,
        }
    }
}

/// A single-page device capability panel.
///
/// Construction is cheap and side-effect free; [`initialize`] runs the
/// one-shot probe sequence and activates the change subscriptions. The
/// view stays usable after any number of probe failures: each failed
/// capability keeps its default snapshot and the sequence continues.
///
/// [`initialize`]: CapabilityView::initialize
pub struct CapabilityView {
    deps: ViewDependencies,
    state: Arc<RwLock<ViewState>>,
    log: Arc<EventLog>,
    bus: EventBus,
    probe: CapabilityProbe,
    subscriptions: std::sync::Mutex<Option<SubscriptionSet>>,
    init_lock: Mutex<()>,
}

impl CapabilityView {
    /// Create a view over the given dependencies with a default event bus.
    pub fn new(deps: ViewDependencies) -> Self {
        Self::with_event_bus(deps, EventBus::new(DEFAULT_EVENT_BUFFER_SIZE))
    }

    /// Create a view from a validated configuration.
    pub fn from_config(config: ViewConfig) -> Self {
        let bus = EventBus::new(config.event_buffer_size);
        Self::with_event_bus(ViewDependencies::from(config), bus)
    }

    /// Create a view publishing to the caller-supplied event bus.
    pub fn with_event_bus(deps: ViewDependencies, bus: EventBus) -> Self {
        let log = Arc::new(EventLog::new());
        let probe = CapabilityProbe::new(
            Arc::clone(&deps.device_info),
            Arc::clone(&deps.camera),
            Arc::clone(&deps.network_monitor),
            Arc::clone(&deps.geolocation),
            Arc::clone(&log),
            deps.diagnostics.clone(),
        );

        Self {
            deps,
            state: Arc::new(RwLock::new(ViewState::default())),
            log,
            bus,
            probe,
            subscriptions: std::sync::Mutex::new(None),
            init_lock: Mutex::new(()),
        }
    }

    /// Run the one-time startup sequence.
    ///
    /// Probes run strictly in order: platform, camera, device, battery,
    /// network, location. A probe failure leaves its snapshot at the
    /// default value and the sequence continues; subscriptions are then
    /// activated and the view transitions to [`ViewPhase::Active`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::AlreadyInitialized`] if the view is already
    /// active. Probe failures are never surfaced here.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<()> {
        let _guard = self.init_lock.lock().await;

        if self.phase().await == ViewPhase::Active {
            return Err(ViewError::AlreadyInitialized);
        }

        match self.probe.probe_platform().await {
            Ok(platform) => {
                self.state.write().await.platform = platform;
                self.emit_completed(Capability::Platform);
            }
            Err(error) => self.handle_probe_failure(error).await,
        }

        let camera_available = self.probe.probe_camera_availability().await;
        self.state.write().await.camera_available = camera_available;
        self.emit_completed(Capability::Camera);

        match self.probe.probe_device_info().await {
            Ok(device) => {
                self.state.write().await.device = device;
                self.emit_completed(Capability::Device);
            }
            Err(error) => self.handle_probe_failure(error).await,
        }

        match self.probe.probe_battery_info().await {
            Ok(battery) => {
                self.state.write().await.battery = battery;
                self.emit_completed(Capability::Battery);
            }
            Err(error) => self.handle_probe_failure(error).await,
        }

        match self.probe.probe_network_info().await {
            Ok(network) => {
                self.state.write().await.network = network;
                self.emit_completed(Capability::Network);
            }
            Err(error) => self.handle_probe_failure(error).await,
        }

        match self.probe.probe_location_info().await {
            Ok(location) => {
                self.state.write().await.location = Some(location);
                self.emit_completed(Capability::Location);
            }
            Err(error) => self.handle_probe_failure(error).await,
        }

        let set = SubscriptionSet::activate(
            self.deps.network_monitor.as_ref(),
            self.deps.lifecycle_observer.as_ref(),
            Arc::clone(&self.state),
            Arc::clone(&self.log),
            self.bus.clone(),
        )
        .await;
        *self.lock_subscriptions() = Some(set);

        {
            let mut state = self.state.write().await;
            state.phase = ViewPhase::Active;
            state.initialized_at = Some(self.deps.clock.now());
        }

        info!("Capability view initialized");
        self.bus.emit(ViewEvent::Initialized).ok();
        Ok(())
    }

    /// Current snapshot of the view state.
    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Current phase without cloning the whole state.
    pub async fn phase(&self) -> ViewPhase {
        self.state.read().await.phase
    }

    /// The on-screen event log.
    pub fn event_log(&self) -> Arc<EventLog> {
        Arc::clone(&self.log)
    }

    /// Subscribe to view events.
    pub fn events(&self) -> broadcast::Receiver<ViewEvent> {
        self.bus.subscribe()
    }

    /// Release the change subscriptions.
    ///
    /// Idempotent; safe to call on a view that was never initialized.
    pub fn close(&self) {
        if let Some(mut set) = self.lock_subscriptions().take() {
            set.close();
        }
    }

    async fn handle_probe_failure(&self, error: ProbeError) {
        self.probe.record_failure(&error).await;
        self.bus
            .emit(ViewEvent::Probe(ProbeEvent::Failed {
                capability: error.capability,
                message: error.source.to_string(),
            }))
            .ok();
    }

    fn emit_completed(&self, capability: Capability) {
        self.bus
            .emit(ViewEvent::Probe(ProbeEvent::Completed { capability }))
            .ok();
    }

    fn lock_subscriptions(&self) -> std::sync::MutexGuard<'_, Option<SubscriptionSet>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for CapabilityView {
    fn drop(&mut self) {
        self.close();
    }
}
