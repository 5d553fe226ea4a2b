//! Relay latch driver.
//!
//! One digital output plus a software `latched` flag that mirrors it.  The
//! output pin on this class of hardware cannot be read back reliably, so the
//! design trusts its own flag rather than the pin.  Writes are idempotent —
//! driving the same level twice leaves the coil unchanged.

use crate::app::ports::DigitalOutput;

/// A relay coil behind one [`DigitalOutput`].
pub struct RelayLatch<O: DigitalOutput> {
    out: O,
    /// Electrical level that energizes the coil.
    active_high: bool,
    latched: bool,
}

impl<O: DigitalOutput> RelayLatch<O> {
    /// Take ownership of the output pin and drive it to the released level.
    pub fn new(mut out: O, active_high: bool) -> Self {
        out.write(!active_high);
        Self {
            out,
            active_high,
            latched: false,
        }
    }

    /// Energize the coil.
    pub fn energize(&mut self) {
        self.out.write(self.active_high);
        self.latched = true;
    }

    /// Release the coil.
    pub fn deenergize(&mut self) {
        self.out.write(!self.active_high);
        self.latched = false;
    }

    /// Software mirror of the coil state — not a hardware read-back.
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}
