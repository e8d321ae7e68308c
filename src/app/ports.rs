//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, displays, the report log, event
//! sinks) implement these traits.  The
//! [`ControlLoop`](super::service::ControlLoop) consumes them via generics,
//! so the domain core never touches hardware directly.
//!
//! All port errors are typed, and none of them is fatal: the loop logs
//! the failure, reports it as an [`AppEvent`], and carries on.

use crate::error::{ActuatorError, SinkError};
use crate::report::Surface;
use crate::sensors::SensorFrame;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Take a fresh reading of every input.
    ///
    /// Never fails: a read error is replaced by that input's safe value
    /// and a missing echo by [`EchoDuration::NoEcho`](crate::sensors::ranging::EchoDuration).
    fn sample(&mut self) -> SensorFrame;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    fn set_light(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Fan PWM duty, 0 (off) – 255 (full).
    fn set_fan_duty(&mut self, duty: u8) -> Result<(), ActuatorError>;

    fn set_gate(&mut self, open: bool) -> Result<(), ActuatorError>;

    fn set_alarm(&mut self, on: bool) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character displays)
// ───────────────────────────────────────────────────────────────

/// Two independent character displays, addressed by [`Surface`].
///
/// A failure on one surface says nothing about the other.
pub trait DisplayPort {
    fn clear(&mut self, surface: Surface) -> Result<(), SinkError>;

    fn set_cursor(&mut self, surface: Surface, col: u8, row: u8) -> Result<(), SinkError>;

    /// Print at the cursor.  Text beyond the last column is dropped by
    /// the display, not by the caller.
    fn print(&mut self, surface: Surface, text: &str) -> Result<(), SinkError>;
}

// ───────────────────────────────────────────────────────────────
// Report log port (driven adapter: domain → diagnostic log)
// ───────────────────────────────────────────────────────────────

/// Line-oriented, human-readable diagnostic output.
pub trait ReportLog {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
