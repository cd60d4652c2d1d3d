//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-view`, `core-runtime`). Host applications can
//! depend on `dpc-workspace` and enable the documented features without
//! needing to wire each crate individually. The `desktop-shims` feature pulls
//! in the desktop bridge adapters so a host can build a working capability
//! view with no extra wiring.
