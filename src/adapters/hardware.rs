//! Hardware adapter — bridges real pins to the domain port traits.
//!
//! This is the only module in the system that touches actual hardware.
//! The wrappers are generic over embedded-hal 1.0 digital traits, so any
//! HAL pin type (ESP-IDF `PinDriver` on target, stub pins in tests) plugs
//! into the domain ports unchanged.  Simulation pins for host runs live
//! here too.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{DigitalInput, DigitalOutput};

// ── embedded-hal wrappers ─────────────────────────────────────

/// Adapts any embedded-hal input pin to the [`DigitalInput`] port.
pub struct HalInput<P: InputPin>(pub P);

impl<P: InputPin> DigitalInput for HalInput<P> {
    fn read(&mut self) -> bool {
        // GPIO reads on this hardware are infallible; a HAL-level error
        // degrades to "low", which the sequencer treats as supply absent.
        self.0.is_high().unwrap_or(false)
    }
}

/// Adapts any embedded-hal output pin to the [`DigitalOutput`] port.
pub struct HalOutput<P: OutputPin>(pub P);

impl<P: OutputPin> DigitalOutput for HalOutput<P> {
    fn write(&mut self, level: bool) {
        let result = if level {
            self.0.set_high()
        } else {
            self.0.set_low()
        };
        // Same infallibility argument as reads.
        let _ = result;
    }
}

// ── ESP-IDF pin construction ──────────────────────────────────

#[cfg(target_os = "espidf")]
mod esp {
    use anyhow::Result;
    use esp_idf_hal::gpio::{AnyIOPin, Input, Output, PinDriver, Pull};

    use super::{HalInput, HalOutput};
    use crate::pins;

    pub type SenseInput = HalInput<PinDriver<'static, AnyIOPin, Input>>;
    pub type RelayOutput = HalOutput<PinDriver<'static, AnyIOPin, Output>>;

    /// Configure the supply-sense pin: input, pulled down so a floating
    /// divider reads as "supply absent".
    pub fn power_sense_input() -> Result<SenseInput> {
        // SAFETY: each GPIO is claimed exactly once, at boot.
        let pin = unsafe { AnyIOPin::new(pins::POWER_SENSE_GPIO) };
        let mut drv = PinDriver::input(pin)?;
        drv.set_pull(Pull::Down)?;
        Ok(HalInput(drv))
    }

    /// Configure the relay coil pin as a push-pull output.
    pub fn relay_output() -> Result<RelayOutput> {
        // SAFETY: each GPIO is claimed exactly once, at boot.
        let pin = unsafe { AnyIOPin::new(pins::RELAY_GPIO) };
        let drv = PinDriver::output(pin)?;
        Ok(HalOutput(drv))
    }
}

#[cfg(target_os = "espidf")]
pub use esp::{power_sense_input, relay_output, RelayOutput, SenseInput};

// ── Simulation pins (host builds) ─────────────────────────────

/// Host-side input pin with a settable level.
#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct SimInput {
    pub level: bool,
}

#[cfg(not(target_os = "espidf"))]
impl DigitalInput for SimInput {
    fn read(&mut self) -> bool {
        self.level
    }
}

/// Host-side output pin that remembers the last written level.
#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct SimOutput {
    pub level: bool,
}

#[cfg(not(target_os = "espidf"))]
impl DigitalOutput for SimOutput {
    fn write(&mut self, level: bool) {
        self.level = level;
    }
}
