//! PowerHold firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod power;
pub mod sequencer;

pub mod adapters;
pub mod drivers;
pub mod pins;
