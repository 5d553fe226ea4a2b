//! Power manager — decides, once per cycle, whether to suspend the
//! processor instead of running the sequencer.
//!
//! The gate is cooperative: sleep and wake are sequential points inside the
//! main control loop, not a separate thread.  When the controller is fully
//! idle (relay unlatched and no supply present) the processor enters light
//! sleep; control returns only when the bounded wake timer expires (the
//! watchdog-expiry stand-in) or the supply-sense pin goes active.  A cycle
//! that slept performs no sequencer work.

use crate::config::SystemConfig;
use crate::sequencer::SequencerState;

/// Pure sleep predicate: fully idle means no relay to hold and no supply to
/// react to, so there is no transition pending this cycle.
pub fn should_sleep(state: &SequencerState, power_present: bool) -> bool {
    !state.relay_latched && !power_present
}

/// Owns the platform sleep primitive and its wake configuration.
pub struct PowerManager {
    wake_interval_ms: u32,
}

impl PowerManager {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            wake_interval_ms: config.sleep_wake_interval_ms,
        }
    }

    /// Whether this cycle should sleep instead of running the sequencer.
    pub fn should_sleep_this_cycle(&self, state: &SequencerState, power_present: bool) -> bool {
        should_sleep(state, power_present)
    }

    /// Suspend the processor until the next enabled wake event.
    ///
    /// Wake sources: the bounded wake timer, and a high level on the
    /// supply-sense pin so a returning supply is noticed without waiting
    /// out the timer.  The brown-out detector is gated by the power
    /// management unit for the duration of light sleep.
    #[cfg(target_os = "espidf")]
    pub fn sleep_until_interrupt(&mut self) {
        use esp_idf_sys::{
            esp_light_sleep_start, esp_sleep_enable_gpio_wakeup, esp_sleep_enable_timer_wakeup,
            gpio_int_type_t_GPIO_INTR_HIGH_LEVEL, gpio_wakeup_enable,
        };

        // SAFETY: plain IDF sleep-configuration calls from the main task;
        // the sense pin was configured as an input during hardware init.
        unsafe {
            esp_sleep_enable_timer_wakeup(u64::from(self.wake_interval_ms) * 1000);
            gpio_wakeup_enable(
                crate::pins::POWER_SENSE_GPIO,
                gpio_int_type_t_GPIO_INTR_HIGH_LEVEL,
            );
            esp_sleep_enable_gpio_wakeup();
            esp_light_sleep_start();
        }
    }

    /// Simulation: approximate the bounded sleep with a plain delay.
    #[cfg(not(target_os = "espidf"))]
    pub fn sleep_until_interrupt(&mut self) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            self.wake_interval_ms,
        )));
    }
}
