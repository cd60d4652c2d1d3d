//! App Lifecycle Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    lifecycle::{AppLifecycleObserver, AppState, LifecycleEvent, LifecycleEventStream},
};

/// Desktop lifecycle observer.
///
/// Desktop hosts stay in the foreground for the lifetime of the process, so
/// the state is always active and the change stream never emits.
pub struct DesktopLifecycleObserver;

impl DesktopLifecycleObserver {
    /// Create a new lifecycle observer
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopLifecycleObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppLifecycleObserver for DesktopLifecycleObserver {
    async fn get_state(&self) -> Result<AppState> {
        Ok(AppState { is_active: true })
    }

    async fn subscribe_changes(&self) -> Result<Box<dyn LifecycleEventStream>> {
        Ok(Box::new(DesktopLifecycleEventStream))
    }
}

/// Desktop lifecycle change stream (never emits).
struct DesktopLifecycleEventStream;

#[async_trait]
impl LifecycleEventStream for DesktopLifecycleEventStream {
    async fn next(&mut self) -> Option<LifecycleEvent> {
        std::future::pending::<()>().await;
        None
    }
}
