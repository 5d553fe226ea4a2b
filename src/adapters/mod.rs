//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                    | Connects to               |
//! |------------|-------------------------------|---------------------------|
//! | `hardware` | DigitalInput / DigitalOutput  | ESP32 GPIO / sim pins     |
//! | `log_sink` | EventSink                     | Serial log (diagnostics)  |

pub mod hardware;
#[cfg(feature = "diagnostics")]
pub mod log_sink;
