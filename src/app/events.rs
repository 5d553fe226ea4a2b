//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The adapter on the other
//! side decides what to do with them — in diagnostics builds they become
//! serial log lines, in production builds the null sink drops them.

use crate::sequencer::SequencerPhase;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// The controller has started (carries initial phase).
    Started(SequencerPhase),

    /// Rule 1 fired: supply seen, relay energized.
    RelayEnergized { at_ms: u64 },

    /// Rule 3 fired: supply lost, countdown armed.
    CountdownArmed { deadline_ms: u64 },

    /// Rule 2 fired: supply restored, countdown cancelled with this much
    /// time left on the clock.
    CountdownCancelled { remaining_ms: u64 },

    /// Rule 4 fired: grace period elapsed, relay released.
    RelayReleased { at_ms: u64 },

    /// The power manager chose to sleep this cycle.
    EnteringSleep { at_ms: u64 },

    /// Per-cycle state report (the serial debug line).
    CycleReport(CycleReport),
}

/// A point-in-time snapshot of the controller state, one per cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub now_ms: u64,
    pub power_present: bool,
    pub relay_latched: bool,
    pub shutdown_armed: bool,
    /// 0 when no deadline is set.
    pub shutdown_deadline_ms: u64,
}
