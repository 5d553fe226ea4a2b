//! GPIO pin assignments for the PowerHold controller board.
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Supply presence sense
// ---------------------------------------------------------------------------

/// Digital input: 12 V supply presence via resistive divider.
/// HIGH = supply present (external pulldown holds it LOW otherwise).
/// Also configured as the light-sleep wake source.
pub const POWER_SENSE_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Relay coil driver
// ---------------------------------------------------------------------------

/// Digital output: relay coil driver transistor (active HIGH).
/// The coil has a flyback diode on-board; no PWM holding current.
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// UART debug (diagnostics builds only)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 21;
pub const UART_RX_GPIO: i32 = 20;
