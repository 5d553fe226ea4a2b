//! Mock pins and event sink for integration tests.
//!
//! The drivers take ownership of their pins, so each mock hands back a
//! shared handle: tests set the input level and inspect the full output
//! write history through the handle while the driver holds the pin.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use powerhold::app::events::AppEvent;
use powerhold::app::ports::{DigitalInput, DigitalOutput, EventSink};

// ── Input pin ─────────────────────────────────────────────────

/// Input pin whose level is set through a shared handle.
pub struct MockInput {
    level: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let level = Rc::new(Cell::new(false));
        (
            Self {
                level: Rc::clone(&level),
            },
            level,
        )
    }
}

impl DigitalInput for MockInput {
    fn read(&mut self) -> bool {
        self.level.get()
    }
}

// ── Output pin ────────────────────────────────────────────────

/// Everything observable about a mock output pin.
#[derive(Default)]
pub struct PinTrace {
    pub level: bool,
    pub writes: Vec<bool>,
}

#[allow(dead_code)]
impl PinTrace {
    /// Number of writes that drove the pin high.
    pub fn high_writes(&self) -> usize {
        self.writes.iter().filter(|&&l| l).count()
    }

    /// Number of writes that drove the pin low.
    pub fn low_writes(&self) -> usize {
        self.writes.iter().filter(|&&l| !l).count()
    }
}

/// Output pin that records every write into a shared [`PinTrace`].
pub struct MockOutput {
    trace: Rc<RefCell<PinTrace>>,
}

impl MockOutput {
    pub fn new() -> (Self, Rc<RefCell<PinTrace>>) {
        let trace = Rc::new(RefCell::new(PinTrace::default()));
        (
            Self {
                trace: Rc::clone(&trace),
            },
            trace,
        )
    }
}

impl DigitalOutput for MockOutput {
    fn write(&mut self, level: bool) {
        let mut trace = self.trace.borrow_mut();
        trace.level = level;
        trace.writes.push(level);
    }
}

// ── Event sink ────────────────────────────────────────────────

/// Sink that records every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

#[allow(dead_code)]
impl RecordingSink {
    /// True if any recorded event matches the predicate.
    pub fn saw(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
