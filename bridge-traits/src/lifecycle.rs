//! App Lifecycle Abstraction
//!
//! Notifies the view core about application lifecycle transitions.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Whether the application is currently in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub is_active: bool,
}

/// A lifecycle notification emitted by the host shell.
///
/// Hosts that expose separate state-change, resume and pause callbacks
/// deliver each as its own event on the stream; the variants carry no
/// ordering relationship to one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Foreground/background transition
    StateChanged { is_active: bool },
    /// App returned to the foreground
    Resumed,
    /// App is about to move to the background
    Paused,
}

/// Lifecycle observer trait
///
/// # Platform Support
///
/// - **iOS**: UIApplication lifecycle notifications
/// - **Android**: Activity/Application lifecycle callbacks
/// - **Desktop**: Always foreground; the change stream never emits
#[async_trait::async_trait]
pub trait AppLifecycleObserver: Send + Sync {
    /// Get current application state
    async fn get_state(&self) -> Result<AppState>;

    /// Subscribe to lifecycle notifications
    async fn subscribe_changes(&self) -> Result<Box<dyn LifecycleEventStream>>;
}

/// Stream of lifecycle notifications
#[async_trait::async_trait]
pub trait LifecycleEventStream: Send {
    /// Get the next lifecycle notification
    ///
    /// Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<LifecycleEvent>;
}
