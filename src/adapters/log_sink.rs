//! Log-based adapters.
//!
//! [`LogEventSink`] implements [`EventSink`] by writing structured
//! application events to the logger (UART / USB-CDC on the device).
//! [`LogReport`] implements [`ReportLog`] by forwarding each line of the
//! per-cycle diagnostic record under the `report` target, so it can be
//! filtered separately from the firmware's own messages.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, ReportLog};
use crate::error::SinkError;
use crate::report::page::{on_off, open_closed, severity_label};

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { cycle_period_ms } => {
                info!("START | cycle_period>={}ms", cycle_period_ms);
            }
            AppEvent::CycleCompleted(c) => {
                info!(
                    "CYCLE | #{} | T={:.1}\u{00b0}C | gas={} | light={} fan={} gate={} alarm={} | \
                     sink_failures={}",
                    c.cycle,
                    c.temperature_c,
                    severity_label(c.gas),
                    on_off(c.light_on),
                    c.fan_duty,
                    open_closed(c.gate_open),
                    on_off(c.alarm_on),
                    c.sink_failures,
                );
            }
            AppEvent::RangingTimeout => {
                info!("RANGE | no echo, gate held closed");
            }
            AppEvent::SinkFailed { stage, error } => {
                warn!("SINK  | {} abandoned: {}", stage, error);
            }
            AppEvent::ActuatorFailed { actuator, error } => {
                warn!("ACT   | {}: {}", actuator, error);
            }
        }
    }
}

/// Diagnostic record sink backed by the logger.
#[derive(Debug, Default)]
pub struct LogReport;

impl LogReport {
    pub const TARGET: &'static str = "report";

    pub fn new() -> Self {
        Self
    }
}

impl ReportLog for LogReport {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        info!(target: Self::TARGET, "{}", line);
        Ok(())
    }
}
