//! Free-running millisecond clock.
//!
//! A periodic hardware timer fires every [`SystemConfig::tick_interval_us`]
//! microseconds (see `drivers::hw_timer`) and calls [`tick`].  Each tick adds
//! the interval to a sub-millisecond remainder; whole milliseconds are carried
//! into a 64-bit counter.  The integer carry keeps long-run drift bounded to
//! the timer's own frequency error — rounding each tick to 0 or 1 ms would
//! accumulate a systematic error instead.
//!
//! ## Concurrency contract
//!
//! The tick handler is the sole writer.  [`now`] is the sole reader, from
//! main-loop context only, and brackets the read in a critical section:
//! the counter is wider than the machine word, so an unguarded read could
//! observe a torn value if a tick lands mid-read.  [`now`] must never be
//! called from the tick handler itself.
//!
//! [`SystemConfig::tick_interval_us`]: crate::config::SystemConfig::tick_interval_us

use core::cell::Cell;

use critical_section::Mutex;

const US_PER_MS: u16 = 1000;

// ---------------------------------------------------------------------------
// ClockState — the accumulation algorithm, kept pure for unit testing
// ---------------------------------------------------------------------------

/// Accumulated clock state.
///
/// Invariant: `pending_us < 1000` between [`advance`](Self::advance) calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    /// Whole milliseconds since power-on.
    millis: u64,
    /// Sub-millisecond remainder (0–999 µs).
    pending_us: u16,
}

impl ClockState {
    pub const fn new() -> Self {
        Self {
            millis: 0,
            pending_us: 0,
        }
    }

    /// Apply one timer firing of `delta_us` microseconds.
    ///
    /// Reduces the remainder below 1000 before returning, carrying every
    /// whole millisecond into the counter.  After N firings of interval I,
    /// `millis() == floor(N * I / 1000)` exactly.
    pub fn advance(&mut self, delta_us: u16) {
        self.pending_us += delta_us;
        while self.pending_us >= US_PER_MS {
            self.millis += 1;
            self.pending_us -= US_PER_MS;
        }
    }

    /// Whole milliseconds accumulated so far.
    pub const fn millis(&self) -> u64 {
        self.millis
    }

    /// Sub-millisecond remainder in microseconds (always < 1000).
    pub const fn pending_us(&self) -> u16 {
        self.pending_us
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Process-wide instance
// ---------------------------------------------------------------------------

static CLOCK: Mutex<Cell<ClockState>> = Mutex::new(Cell::new(ClockState::new()));

/// Advance the clock by one timer period.  Called from the tick timer
/// callback only — the single writer.
pub fn tick(interval_us: u16) {
    critical_section::with(|cs| {
        let cell = CLOCK.borrow(cs);
        let mut state = cell.get();
        state.advance(interval_us);
        cell.set(state);
    });
}

/// Current accumulated millisecond count, monotonically non-decreasing for
/// the life of the process.  Main-loop context only.
pub fn now() -> u64 {
    critical_section::with(|cs| CLOCK.borrow(cs).get().millis())
}
