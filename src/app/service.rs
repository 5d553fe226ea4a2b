//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the sequencer state and runs one control cycle at a
//! time: apply the four transition rules to a cached [`CycleSnapshot`],
//! execute the resulting relay command, and emit diagnostic events.  All
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  CycleSnapshot ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  (power, now)      │        AppService         │
//!     RelayLatch ◀───│  Sequencer · TransitionLog│
//!                    └──────────────────────────┘
//! ```

use crate::config::SystemConfig;
use crate::diagnostics::TransitionLog;
use crate::drivers::relay::RelayLatch;
use crate::sequencer::{CycleSnapshot, RelayCommand, SequencerPhase, SequencerState};

use super::events::{AppEvent, CycleReport};
use super::ports::{DigitalOutput, EventSink};

/// The application service orchestrates the control cycle.
pub struct AppService {
    state: SequencerState,
    config: SystemConfig,
    transitions: TransitionLog,
    cycle_count: u64,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            state: SequencerState::new(),
            config,
            transitions: TransitionLog::new(),
            cycle_count: 0,
        }
    }

    /// Announce startup through the sink.  The sequencer needs no other
    /// priming — it starts in Idle and reacts to the first snapshot.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.state.phase()));
    }

    /// Run one full control cycle: sequencer rules → relay command →
    /// diagnostic events.  `snap` must carry this cycle's single power
    /// sample and single clock read.
    pub fn run_cycle<O: DigitalOutput>(
        &mut self,
        snap: CycleSnapshot,
        relay: &mut RelayLatch<O>,
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;
        let before = self.state;

        let command = self.state.step(snap, self.config.grace_period_ms);

        match command {
            Some(RelayCommand::Energize) => {
                relay.energize();
                sink.emit(&AppEvent::RelayEnergized { at_ms: snap.now_ms });
            }
            Some(RelayCommand::Deenergize) => {
                relay.deenergize();
                sink.emit(&AppEvent::RelayReleased { at_ms: snap.now_ms });
            }
            None => {}
        }

        if !before.shutdown_armed && self.state.shutdown_armed {
            sink.emit(&AppEvent::CountdownArmed {
                deadline_ms: self.state.shutdown_deadline_ms,
            });
        }
        if before.shutdown_armed && !self.state.shutdown_armed && self.state.relay_latched {
            // Cancelled by restoration (a release is reported above instead).
            sink.emit(&AppEvent::CountdownCancelled {
                remaining_ms: before.shutdown_deadline_ms.saturating_sub(snap.now_ms),
            });
        }

        if before.phase() != self.state.phase() {
            self.transitions
                .record(snap.now_ms, before.phase(), self.state.phase());
        }

        sink.emit(&AppEvent::CycleReport(self.cycle_report(snap)));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current sequencer state (copy — mutation happens only in
    /// [`run_cycle`](Self::run_cycle)).
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Current machine phase.
    pub fn phase(&self) -> SequencerPhase {
        self.state.phase()
    }

    /// Control cycles executed since startup (sleep cycles excluded).
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Recent phase transitions, oldest first.
    pub fn recent_transitions(&self) -> &TransitionLog {
        &self.transitions
    }

    fn cycle_report(&self, snap: CycleSnapshot) -> CycleReport {
        CycleReport {
            now_ms: snap.now_ms,
            power_present: snap.power_present,
            relay_latched: self.state.relay_latched,
            shutdown_armed: self.state.shutdown_armed,
            shutdown_deadline_ms: self.state.shutdown_deadline_ms,
        }
    }
}
