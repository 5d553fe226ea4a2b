//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (UART / USB-CDC in diagnostics builds).  This module only exists
//! with the `diagnostics` feature; production builds use
//! [`NullEventSink`](crate::app::ports::NullEventSink) and carry none of
//! this code.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::diagnostics;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(phase) => {
                info!("START | initial_phase={:?}", phase);
            }
            AppEvent::RelayEnergized { at_ms } => {
                info!("RELAY | energized at t={} ms", at_ms);
            }
            AppEvent::CountdownArmed { deadline_ms } => {
                info!("HOLD  | countdown armed, release at t={} ms", deadline_ms);
            }
            AppEvent::CountdownCancelled { remaining_ms } => {
                info!("HOLD  | cancelled with {} ms remaining", remaining_ms);
            }
            AppEvent::RelayReleased { at_ms } => {
                info!("RELAY | released at t={} ms", at_ms);
            }
            AppEvent::EnteringSleep { at_ms } => {
                debug!("SLEEP | idle at t={} ms, suspending", at_ms);
            }
            AppEvent::CycleReport(report) => {
                debug!("CYCLE | {}", diagnostics::format_cycle(report));
            }
        }
    }
}
