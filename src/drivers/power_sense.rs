//! Supply-presence sense driver.
//!
//! A single digital input, polarity fixed by board wiring.  No caching and
//! no software debounce — the divider and its filter capacitor condition the
//! signal upstream.  The control loop calls [`PowerSense::is_power_present`]
//! exactly once per cycle and holds the result in its snapshot.

use crate::app::ports::DigitalInput;

/// Supply-presence input behind one [`DigitalInput`].
pub struct PowerSense<I: DigitalInput> {
    input: I,
    /// Electrical level that means "supply present".
    active_high: bool,
}

impl<I: DigitalInput> PowerSense<I> {
    pub fn new(input: I, active_high: bool) -> Self {
        Self { input, active_high }
    }

    /// Direct, synchronous presence read.
    pub fn is_power_present(&mut self) -> bool {
        self.input.read() == self.active_high
    }
}
