//! Scenario tests: full control cycles through AppService, RelayLatch, and
//! PowerSense against mock pins.
//!
//! Timelines follow the product behaviour: supply appears → relay latches;
//! supply drops → 5 s hold-up; then release, unless the supply returns first.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use powerhold::app::events::AppEvent;
use powerhold::app::service::AppService;
use powerhold::config::SystemConfig;
use powerhold::drivers::power_sense::PowerSense;
use powerhold::drivers::relay::RelayLatch;
use powerhold::sequencer::{CycleSnapshot, SequencerPhase};

use crate::mock_hw::{MockInput, MockOutput, PinTrace, RecordingSink};

const GRACE: u64 = 5000;

struct Harness {
    app: AppService,
    sense: PowerSense<MockInput>,
    relay: RelayLatch<MockOutput>,
    supply: Rc<Cell<bool>>,
    coil: Rc<RefCell<PinTrace>>,
    sink: RecordingSink,
}

impl Harness {
    fn new() -> Self {
        let config = SystemConfig::default();
        assert_eq!(config.grace_period_ms, GRACE, "timelines assume 5 s hold-up");
        let (sense_pin, supply) = MockInput::new();
        let (relay_pin, coil) = MockOutput::new();
        Self {
            app: AppService::new(config.clone()),
            sense: PowerSense::new(sense_pin, config.power_sense_active_high),
            relay: RelayLatch::new(relay_pin, config.relay_active_high),
            supply,
            coil,
            sink: RecordingSink::default(),
        }
    }

    /// One control cycle at `now_ms` with the supply pin at `supply`.
    /// Samples the pin exactly once, like the main loop.
    fn cycle(&mut self, supply: bool, now_ms: u64) {
        self.supply.set(supply);
        let power_present = self.sense.is_power_present();
        self.app.run_cycle(
            CycleSnapshot {
                power_present,
                now_ms,
            },
            &mut self.relay,
            &mut self.sink,
        );
    }

    fn coil_level(&self) -> bool {
        self.coil.borrow().level
    }

    fn coil_low_writes(&self) -> usize {
        self.coil.borrow().low_writes()
    }
}

#[test]
fn power_cycle_with_full_grace_period() {
    let mut h = Harness::new();

    // t=0: supply appears, relay energizes.
    h.cycle(true, 0);
    assert!(h.relay.is_latched());
    assert!(h.coil_level());

    // t=1000: supply lost, countdown armed with deadline 6000, relay held.
    h.cycle(false, 1000);
    assert_eq!(h.app.phase(), SequencerPhase::CountingDown);
    assert_eq!(h.app.state().shutdown_deadline_ms, 1000 + GRACE);
    assert!(h.relay.is_latched());

    // Intermediate cycles: holding.
    for t in (1100..=5900).step_by(100) {
        h.cycle(false, t);
        assert!(h.relay.is_latched(), "must hold at t={t}");
    }

    // t=5999: one millisecond before the deadline, still energized.
    h.cycle(false, 5999);
    assert!(h.relay.is_latched());

    // t=6000: deadline reached (>=), released, back to Idle.
    h.cycle(false, 6000);
    assert!(!h.relay.is_latched());
    assert!(!h.coil_level());
    assert_eq!(h.app.phase(), SequencerPhase::Idle);
    assert!(h
        .sink
        .saw(|e| matches!(e, AppEvent::RelayReleased { at_ms: 6000 })));
}

#[test]
fn power_restored_mid_countdown_cancels_release() {
    let mut h = Harness::new();

    h.cycle(true, 0);
    h.cycle(false, 1000);
    assert_eq!(h.app.state().shutdown_deadline_ms, 6000);

    // t=3000 (before the deadline): supply returns, countdown cancelled.
    h.cycle(true, 3000);
    let state = h.app.state();
    assert!(!state.shutdown_armed);
    assert_eq!(state.shutdown_deadline_ms, 0);
    assert!(h.relay.is_latched());

    // The relay was never de-energized: the only low write is the one
    // RelayLatch::new performs to park the coil released.
    assert_eq!(h.coil_low_writes(), 1);
    assert!(h
        .sink
        .saw(|e| matches!(e, AppEvent::CountdownCancelled { remaining_ms: 3000 })));

    // Long after the old deadline the relay is still held.
    h.cycle(true, 10_000);
    assert!(h.relay.is_latched());
}

#[test]
fn flicker_within_one_cycle_keeps_relay_energized() {
    let mut h = Harness::new();

    h.cycle(true, 0);
    assert!(h.relay.is_latched());

    // The supply dips and recovers between samples: the t=100 cycle already
    // sees it back.  Nothing observable happened.
    h.cycle(true, 100);
    assert_eq!(h.app.phase(), SequencerPhase::Energized);
    assert_eq!(h.coil_low_writes(), 1, "construction write only");
}

#[test]
fn single_cycle_dropout_arms_then_cancels_without_release() {
    let mut h = Harness::new();

    h.cycle(true, 0);
    // Dropout visible for exactly one cycle.
    h.cycle(false, 100);
    assert_eq!(h.app.phase(), SequencerPhase::CountingDown);
    // Back on the next cycle: countdown cancelled, relay never released.
    h.cycle(true, 200);
    assert_eq!(h.app.phase(), SequencerPhase::Energized);
    assert!(h.relay.is_latched());
    assert_eq!(h.coil_low_writes(), 1, "construction write only");
}

#[test]
fn repeated_power_cycles_keep_working() {
    let mut h = Harness::new();
    let mut t = 0u64;

    for round in 0..3 {
        h.cycle(true, t);
        assert!(h.relay.is_latched(), "round {round}: energize");

        t += 1000;
        h.cycle(false, t);
        let deadline = h.app.state().shutdown_deadline_ms;
        assert_eq!(deadline, t + GRACE, "round {round}: armed");

        t = deadline;
        h.cycle(false, t);
        assert!(!h.relay.is_latched(), "round {round}: released");
        assert_eq!(h.app.phase(), SequencerPhase::Idle);

        t += 1000;
    }
}

#[test]
fn started_event_reports_idle() {
    let mut h = Harness::new();
    h.app.start(&mut h.sink);
    assert!(h
        .sink
        .saw(|e| matches!(e, AppEvent::Started(SequencerPhase::Idle))));
}

#[test]
fn every_cycle_emits_a_report() {
    let mut h = Harness::new();
    h.cycle(true, 0);
    h.cycle(false, 100);
    h.cycle(false, 200);

    let reports = h
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::CycleReport(_)))
        .count();
    assert_eq!(reports, 3);
}

#[test]
fn reports_reflect_the_cycle_snapshot() {
    let mut h = Harness::new();
    h.cycle(true, 0);
    h.cycle(false, 1000);

    match h.sink.events.last() {
        Some(AppEvent::CycleReport(report)) => {
            assert_eq!(report.now_ms, 1000);
            assert!(!report.power_present);
            assert!(report.relay_latched);
            assert!(report.shutdown_armed);
            assert_eq!(report.shutdown_deadline_ms, 6000);
        }
        other => panic!("expected a cycle report, got {other:?}"),
    }
}
