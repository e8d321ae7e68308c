//! Control loop — the hexagonal core.
//!
//! [`ControlLoop`] owns the decision rules and the report sequencer.  All
//! I/O flows through port traits injected at call sites, making the whole
//! cycle testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ DisplayPort
//!                 │       ControlLoop       │ ──▶ ReportLog
//! ActuatorPort ◀──│  Rules · ReportSequencer│ ──▶ EventSink
//!                 └────────────────────────┘
//! ```
//!
//! One cycle is strictly sequential:
//! sample → derive → decide → actuate → pages → log record → trailing delay.
//! Nothing computed in one cycle is read by the next; the counters kept
//! here are diagnostics only.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::Rules;
use crate::error::{ActuatorError, ConfigError};
use crate::report::{CycleReport, ReportSequencer};
use crate::sensors::SensorFrame;
use crate::sensors::ranging::EchoDuration;

use super::events::{Actuator, AppEvent, CycleSummary};
use super::ports::{ActuatorPort, DisplayPort, EventSink, ReportLog, SensorPort};

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop {
    rules: Rules,
    sequencer: ReportSequencer,
    inter_cycle_delay_ms: u32,
    cycle_count: u64,
    ranging_timeouts: u64,
    sink_failures: u64,
    actuator_failures: u64,
}

impl ControlLoop {
    /// Build the loop from a validated configuration.
    pub fn new(config: &SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rules: Rules::new(config.thresholds),
            sequencer: ReportSequencer::new(config.timing),
            inter_cycle_delay_ms: config.timing.inter_cycle_delay_ms,
            cycle_count: 0,
            ranging_timeouts: 0,
            sink_failures: 0,
            actuator_failures: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the startup banner on both displays and hold it.
    pub fn boot(
        &mut self,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        self.sequencer.show_banner(display, delay, sink);
        let cycle_period_ms = self.sequencer.timing().cycle_period_ms();
        info!("ControlLoop started, cycle period >= {} ms", cycle_period_ms);
        sink.emit(&AppEvent::Started { cycle_period_ms });
    }

    /// Run cycles forever.  There is no shutdown path.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        log: &mut impl ReportLog,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.run_cycle(hw, display, log, delay, sink);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle and return what it produced.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], the same physical board on either side.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        log: &mut impl ReportLog,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;

        // 1. Sample
        let frame = hw.sample();
        if frame.echo == EchoDuration::NoEcho {
            self.ranging_timeouts += 1;
            sink.emit(&AppEvent::RangingTimeout);
        }

        // 2–3. Derive and decide (pure)
        let report = self.evaluate(frame);
        debug!("cycle {}: {:?}", self.cycle_count, report.decision);

        // 4. Actuate
        self.apply_actuators(hw, &report, sink);

        // 5–6. Pages, then the log record
        let outcome = self.sequencer.run(&report, display, log, delay, sink);
        let failed = outcome.failures();
        self.sink_failures += failed as u64;

        // 7. Trailing delay
        delay.delay_ms(self.inter_cycle_delay_ms);

        sink.emit(&AppEvent::CycleCompleted(CycleSummary {
            cycle: self.cycle_count,
            temperature_c: report.derived.temperature_c,
            gas: report.derived.gas,
            light_on: report.decision.light_on,
            fan_duty: report.decision.fan_duty,
            gate_open: report.decision.gate_open,
            alarm_on: report.decision.alarm_on,
            sink_failures: failed as u8,
        }));
        report
    }

    /// Derive and decide for one frame.  Pure: no ports, no counters.
    pub fn evaluate(&self, frame: SensorFrame) -> CycleReport {
        let derived = self.rules.derive(&frame);
        let decision = self.rules.decide(&frame, &derived);
        CycleReport {
            frame,
            derived,
            decision,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Cycles started since boot.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Cycles whose ranging produced no echo.
    pub fn ranging_timeouts(&self) -> u64 {
        self.ranging_timeouts
    }

    /// Report stages abandoned since boot.
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures
    }

    pub fn actuator_failures(&self) -> u64 {
        self.actuator_failures
    }

    // ── Internal ──────────────────────────────────────────────

    /// Write every actuator.  A failure on one does not skip the rest.
    fn apply_actuators(
        &mut self,
        hw: &mut impl ActuatorPort,
        report: &CycleReport,
        sink: &mut impl EventSink,
    ) {
        let d = &report.decision;
        let results: [(Actuator, Result<(), ActuatorError>); 4] = [
            (Actuator::Light, hw.set_light(d.light_on)),
            (Actuator::Fan, hw.set_fan_duty(d.fan_duty)),
            (Actuator::Alarm, hw.set_alarm(d.alarm_on)),
            (Actuator::Gate, hw.set_gate(d.gate_open)),
        ];
        for (actuator, result) in results {
            if let Err(error) = result {
                self.actuator_failures += 1;
                warn!("{} write failed: {}", actuator, error);
                sink.emit(&AppEvent::ActuatorFailed { actuator, error });
            }
        }
    }
}
