//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the device panel core:
//! - Logging and tracing infrastructure
//! - View configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the view core depends on. It
//! establishes the logging conventions, the bridge-injection configuration
//! and the event broadcasting mechanism used throughout the system.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
