//! Shutdown sequencer — the relay hold-up state machine.
//!
//! ```text
//!  IDLE ──[supply present]──▶ ENERGIZED
//!    ▲                            │
//!    │                     [supply lost]
//!    │                            ▼
//!    └──[grace elapsed]── COUNTING DOWN ──[supply back]──▶ ENERGIZED
//! ```
//!
//! The machine is a pure function: [`SequencerState::step`] takes an explicit
//! [`CycleSnapshot`] (one supply sample and one clock read, both taken once
//! at cycle entry) and returns the relay command for this cycle, if any.
//! Hardware writes happen in the caller, so every rule is independently
//! testable without pins.
//!
//! The four rules run in fixed order every cycle.  Order matters: supply
//! restoration (rule 2) is checked before the deadline (rule 4), so a supply
//! that returns on the boundary cycle always wins over a pending release.

use log::{debug, info};

/// Sentinel for "no deadline set".
pub const NO_DEADLINE: u64 = 0;

/// One control cycle's cached inputs.
///
/// Both fields are sampled exactly once at cycle entry; every rule in the
/// cycle sees the same snapshot.  Re-reading the pin mid-cycle could observe
/// a transition and split one loss event across two rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSnapshot {
    /// Supply presence, polarity already normalised.
    pub power_present: bool,
    /// Millisecond clock at cycle entry.
    pub now_ms: u64,
}

/// Hardware effect requested by a cycle.  At most one per cycle: rule 1
/// requires the relay unlatched and rule 4 requires an armed countdown,
/// which implies latched — they cannot both fire in the same invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    Energize,
    Deenergize,
}

/// Derived machine position, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerPhase {
    /// Relay off, no supply.  Initial phase.
    Idle,
    /// Relay on, supply present (steady state).
    Energized,
    /// Relay on, supply lost, waiting for the grace deadline.
    CountingDown,
}

/// The three flags that encode the machine position.
///
/// Invariants, preserved by [`step`](Self::step):
/// - `shutdown_deadline_ms != 0` ⇒ `shutdown_armed`
/// - `!relay_latched` ⇒ `!shutdown_armed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerState {
    /// True iff the relay output is currently energized.
    pub relay_latched: bool,
    /// True iff a countdown to de-energize is in progress.
    pub shutdown_armed: bool,
    /// Absolute clock value at which to de-energize; meaningful only while
    /// `shutdown_armed`.  [`NO_DEADLINE`] otherwise.
    pub shutdown_deadline_ms: u64,
}

impl SequencerState {
    pub const fn new() -> Self {
        Self {
            relay_latched: false,
            shutdown_armed: false,
            shutdown_deadline_ms: NO_DEADLINE,
        }
    }

    /// Current phase, derived from the flags.
    pub fn phase(&self) -> SequencerPhase {
        match (self.relay_latched, self.shutdown_armed) {
            (false, _) => SequencerPhase::Idle,
            (true, false) => SequencerPhase::Energized,
            (true, true) => SequencerPhase::CountingDown,
        }
    }

    /// True iff both state invariants hold.
    pub fn invariants_hold(&self) -> bool {
        (self.shutdown_deadline_ms == NO_DEADLINE || self.shutdown_armed)
            && (self.relay_latched || !self.shutdown_armed)
    }

    /// Run one control cycle: evaluate the four transition rules in order
    /// against `snap` and return the hardware effect, if any.
    pub fn step(&mut self, snap: CycleSnapshot, grace_period_ms: u64) -> Option<RelayCommand> {
        let mut command = None;

        // Rule 1 — supply present, relay not latched: energize.
        if snap.power_present && !self.relay_latched {
            info!("supply seen at t={} ms — energizing relay", snap.now_ms);
            self.relay_latched = true;
            command = Some(RelayCommand::Energize);
        }

        // Rule 2 — supply restored while counting down: cancel.  The relay
        // was never released, so no re-energize is needed.
        if snap.power_present && self.shutdown_armed {
            info!(
                "supply restored at t={} ms — cancelling powerdown ({} ms early)",
                snap.now_ms,
                self.shutdown_deadline_ms.saturating_sub(snap.now_ms)
            );
            self.shutdown_armed = false;
            self.shutdown_deadline_ms = NO_DEADLINE;
        }

        // Rule 3 — supply lost while latched, no countdown yet: arm.
        if self.relay_latched && !self.shutdown_armed && !snap.power_present {
            self.shutdown_deadline_ms = snap.now_ms + grace_period_ms;
            self.shutdown_armed = true;
            info!(
                "supply lost at t={} ms — countdown armed, deadline t={} ms",
                snap.now_ms, self.shutdown_deadline_ms
            );
        }

        // Rule 4 — deadline reached (>=: a cycle landing exactly on the
        // deadline fires the release): de-energize and reset to Idle.
        if self.shutdown_armed && snap.now_ms >= self.shutdown_deadline_ms {
            info!("grace period elapsed at t={} ms — releasing relay", snap.now_ms);
            self.relay_latched = false;
            self.shutdown_armed = false;
            self.shutdown_deadline_ms = NO_DEADLINE;
            command = Some(RelayCommand::Deenergize);
        }

        debug_assert!(self.invariants_hold());
        debug!(
            "cycle t={} ms power={} -> {:?}",
            snap.now_ms,
            snap.power_present,
            self.phase()
        );
        command
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new()
    }
}
