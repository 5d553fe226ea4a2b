//! Pin drivers and peripheral helpers.

pub mod hw_timer;
pub mod power_sense;
pub mod relay;
pub mod watchdog;
