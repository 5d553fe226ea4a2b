//! Build-time system configuration.
//!
//! All timing and polarity parameters for the PowerHold controller.
//! Every value here is fixed at build time — there is no provisioning or
//! runtime-mutation path.  The struct form (rather than bare constants)
//! keeps the core's call signatures uniform and the values testable.

use serde::{Deserialize, Serialize};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Shutdown sequencer ---
    /// Hold-up time between supply loss and relay release (milliseconds).
    pub grace_period_ms: u64,

    // --- Clock ---
    /// Hardware tick timer period (microseconds).
    pub tick_interval_us: u16,

    // --- Control loop ---
    /// Pacing delay between control cycles (milliseconds).
    pub cycle_interval_ms: u32,

    // --- Power management ---
    /// Sleep wake interval (milliseconds) — the watchdog-expiry stand-in
    /// that bounds how long an idle sleep can last.
    pub sleep_wake_interval_ms: u32,
    /// Task watchdog timeout for the main loop (milliseconds).
    pub watchdog_timeout_ms: u32,

    // --- Signal polarity (fixed by board wiring) ---
    /// Supply-presence input reads high when the supply is present.
    pub power_sense_active_high: bool,
    /// Relay output drives high to energize the coil.
    pub relay_active_high: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // 5 s hold-up: enough for the downstream SBC to run its
            // shutdown scripts and sync filesystems.
            grace_period_ms: 5000,

            // 0.256 ms tick — the timer's native period at the chosen
            // prescaler; clock.rs accumulates the sub-millisecond remainder.
            tick_interval_us: 256,

            // 100 ms cycle pacing (sense resolution).
            cycle_interval_ms: 100,

            // ~0.5 s bounded sleep, 10 s loop-stall watchdog.
            sleep_wake_interval_ms: 500,
            watchdog_timeout_ms: 10_000,

            // Active-high sense (pulldown on the divider), active-high coil.
            power_sense_active_high: true,
            relay_active_high: true,
        }
    }
}
