//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! The hardware ports are deliberately single-operation: one read for an
//! input pin, one write for an output pin.  The sequencer and power manager
//! depend only on these, so the hardware binding can be swapped or mocked
//! for host testing.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Digital pin ports (driven adapters: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one digital input pin.
pub trait DigitalInput {
    /// Synchronous level read.  `true` = electrically high.
    fn read(&mut self) -> bool;
}

/// Write-side port: one digital output pin.
pub trait DigitalOutput {
    /// Synchronous level write.  `true` = drive high.
    fn write(&mut self, level: bool);
}

// ───────────────────────────────────────────────────────────────
// Diagnostic sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log in diagnostics builds, nowhere in
/// production).  Purely observational: implementations must never feed
/// back into control decisions.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Sink for production builds — drops every event.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: &AppEvent) {}
}
