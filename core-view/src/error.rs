use bridge_traits::error::BridgeError;
use core_runtime::events::Capability;
use thiserror::Error;

/// Failure of a single capability probe.
///
/// Probe failures are tolerated by the initialization sequencer: the
/// corresponding snapshot keeps its default value and the failure is
/// recorded to diagnostics. The error type exists so callers invoking a
/// probe directly still learn which capability failed and why.
#[derive(Error, Debug)]
#[error("{capability} probe failed: {source}")]
pub struct ProbeError {
    /// The capability that was being probed.
    pub capability: Capability,
    /// The underlying bridge failure.
    #[source]
    pub source: BridgeError,
}

impl ProbeError {
    pub fn new(capability: Capability, source: BridgeError) -> Self {
        Self { capability, source }
    }
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("View already initialized")]
    AlreadyInitialized,

    #[error("Subscription setup failed: {0}")]
    Subscription(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, ViewError>;
