//! # Device Panel View Core
//!
//! Platform-agnostic core of the device capability panel. On
//! initialization it probes the host through the `bridge-traits`
//! capability services (platform identity, camera availability, device and
//! battery details, connectivity, position), collects the results into a
//! renderable [`ViewState`], and keeps an append-only [`EventLog`] fed by
//! network-change and app-lifecycle subscriptions.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                CapabilityView                 │
//! │  ┌─────────────────┐   ┌───────────────────┐  │
//! │  │ CapabilityProbe │   │  SubscriptionSet  │  │
//! │  │  one-shot reads │   │  change streams   │  │
//! │  └────────┬────────┘   └─────────┬─────────┘  │
//! │           ▼                      ▼            │
//! │      ViewState              EventLog          │
//! └───────────────────────────────────────────────┘
//!                      │
//!                      ▼
//!            bridge-traits services
//! ```
//!
//! Probe failures are tolerated: the affected snapshot keeps its default
//! value, the failure goes to the diagnostic channel, and initialization
//! continues. The host renders whatever the view managed to collect.

pub mod error;
pub mod log;
pub mod probe;
pub mod snapshot;
pub mod subscriptions;
pub mod view;

pub use error::{ProbeError, ViewError};
pub use log::EventLog;
pub use snapshot::{
    BatterySnapshot, DeviceSnapshot, LocationSnapshot, NetworkSnapshot, PlatformInfo, ViewPhase,
    ViewState,
};
pub use subscriptions::SubscriptionSet;
pub use view::{CapabilityView, ViewDependencies};

// Event types hosts need to consume view notifications.
pub use core_runtime::events::{
    Capability, EventBus, EventSeverity, LifecycleNotice, NetworkEvent, ProbeEvent, ViewEvent,
};
