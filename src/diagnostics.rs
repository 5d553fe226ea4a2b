//! Runtime diagnostics: bounded transition history and cycle-report
//! formatting.
//!
//! Everything here is observational.  The transition log is a fixed-capacity
//! ring (no heap) holding the most recent phase changes for post-mortem
//! inspection over the serial console; the report formatter renders the
//! per-cycle state line that diagnostics builds print every cycle.

use core::fmt::Write as _;

use heapless::{Deque, String};

use crate::app::events::CycleReport;
use crate::sequencer::SequencerPhase;

/// Transitions retained before the oldest is dropped.
const TRANSITION_SLOTS: usize = 16;

/// One recorded phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub at_ms: u64,
    pub from: SequencerPhase,
    pub to: SequencerPhase,
}

/// Fixed-capacity ring of recent phase transitions, oldest first.
#[derive(Default)]
pub struct TransitionLog {
    entries: Deque<TransitionRecord, TRANSITION_SLOTS>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition, dropping the oldest when full.
    pub fn record(&mut self, at_ms: u64, from: SequencerPhase, to: SequencerPhase) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail: a slot was just freed if the ring was full.
        let _ = self.entries.push_back(TransitionRecord { at_ms, from, to });
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render the per-cycle debug line.
///
/// Truncation is impossible in practice: the longest rendering of every
/// field fits well inside the buffer.
pub fn format_cycle(report: &CycleReport) -> String<128> {
    let mut line = String::new();
    let _ = write!(
        line,
        "t={} power={} latched={} armed={} deadline={}",
        report.now_ms,
        u8::from(report.power_present),
        u8::from(report.relay_latched),
        u8::from(report.shutdown_armed),
        report.shutdown_deadline_ms,
    );
    line
}
