//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::control::GasSeverity;
use crate::error::{ActuatorError, SinkError};
use crate::report::ReportStage;

/// Output line named in [`AppEvent::ActuatorFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuator {
    Light,
    Fan,
    Gate,
    Alarm,
}

impl core::fmt::Display for Actuator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Light => write!(f, "light relay"),
            Self::Fan => write!(f, "fan"),
            Self::Gate => write!(f, "gate motor"),
            Self::Alarm => write!(f, "alarm buzzer"),
        }
    }
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The banner has been shown; cycles start next.
    Started { cycle_period_ms: u32 },

    /// A full cycle, including its trailing delay, has finished.
    CycleCompleted(CycleSummary),

    /// No echo arrived within the ranging timeout; the gate stays closed.
    RangingTimeout,

    /// A report stage was abandoned.
    SinkFailed { stage: ReportStage, error: SinkError },

    /// One actuator could not be written; the others were.
    ActuatorFailed { actuator: Actuator, error: ActuatorError },
}

/// What one cycle decided, for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSummary {
    /// 1-based cycle number since boot.
    pub cycle: u64,
    pub temperature_c: f32,
    pub gas: GasSeverity,
    pub light_on: bool,
    pub fan_duty: u8,
    pub gate_open: bool,
    pub alarm_on: bool,
    /// Report stages abandoned in this cycle.
    pub sink_failures: u8,
}
