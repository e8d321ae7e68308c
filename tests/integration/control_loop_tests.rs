//! Integration tests for the sample → decide → actuate pipeline of
//! `ControlLoop`, run against the mock adapters.

use smarthome::app::events::{Actuator, AppEvent};
use smarthome::app::service::ControlLoop;
use smarthome::config::SystemConfig;
use smarthome::control::{Distance, GasSeverity};
use smarthome::error::ActuatorError;
use smarthome::report::{CycleReport, Surface};
use smarthome::sensors::ranging::EchoDuration;

use crate::mock_hw::{
    ActuatorCall, LogSink, MockDelay, MockDisplays, MockHardware, MockLog, Op, Trace,
    quiet_frame, scenario_frame,
};

struct Rig {
    trace: Trace,
    control: ControlLoop,
    hw: MockHardware,
    displays: MockDisplays,
    log: MockLog,
    delay: MockDelay,
    sink: LogSink,
}

impl Rig {
    fn new() -> Self {
        let trace = Trace::new();
        Self {
            control: ControlLoop::new(&SystemConfig::default()).unwrap(),
            hw: MockHardware::new(&trace, scenario_frame()),
            displays: MockDisplays::new(&trace),
            log: MockLog::new(&trace),
            delay: MockDelay::new(&trace),
            sink: LogSink::new(&trace),
            trace,
        }
    }

    fn cycle(&mut self) -> CycleReport {
        self.control.run_cycle(
            &mut self.hw,
            &mut self.displays,
            &mut self.log,
            &mut self.delay,
            &mut self.sink,
        )
    }
}

// ── End-to-end scenario ───────────────────────────────────────

#[test]
fn scenario_frame_drives_every_output() {
    let mut rig = Rig::new();
    let report = rig.cycle();

    assert!((report.derived.temperature_c - 316.57).abs() < 0.01);
    assert_eq!(report.derived.gas, GasSeverity::VeryHigh);
    match report.derived.distance {
        Distance::Cm(cm) => assert!((cm - 49.88).abs() < 0.01, "cm = {cm}"),
        Distance::NoObject => panic!("expected a measured distance"),
    }

    // (light, fan, gate, alarm)
    assert_eq!(
        rig.trace.outputs(),
        (Some(true), Some(255), Some(true), Some(true))
    );
}

#[test]
fn scenario_pages_and_record_text() {
    let mut rig = Rig::new();
    rig.cycle();

    assert_eq!(
        rig.trace.prints(Surface::Primary),
        ["Light: ON", "Temp: 316.6C", "Fan Speed:", "255"]
    );
    assert_eq!(
        rig.trace.prints(Surface::Secondary),
        ["Gate: OPEN", "Gas: VERY HIGH"]
    );
    assert_eq!(
        rig.trace.log_lines(),
        [
            "------ Sensor Data ------",
            "Light Level: 300",
            "Motion Detected: Yes",
            "Temperature: 316.57 \u{00b0}C",
            "Fan Speed: 255",
            "Gas Level: 850",
            "Smoke Status: VERY HIGH",
            "Distance to Object: 49.9 cm",
            "Gate Status: OPEN",
            "-------------------------",
        ]
    );
}

// ── Ranging timeout ───────────────────────────────────────────

#[test]
fn no_echo_keeps_gate_closed_and_is_reported() {
    let mut rig = Rig::new();
    let mut frame = scenario_frame();
    frame.echo = EchoDuration::NoEcho;
    rig.hw.queue(frame);

    let report = rig.cycle();

    assert_eq!(report.derived.distance, Distance::NoObject);
    assert!(!report.decision.gate_open);
    assert_eq!(rig.trace.outputs().2, Some(false));
    assert!(rig.trace.events().contains(&AppEvent::RangingTimeout));
    assert_eq!(rig.control.ranging_timeouts(), 1);
    assert!(
        rig.trace
            .log_lines()
            .contains(&"Distance to Object: none".to_string())
    );
}

// ── Actuator failure ──────────────────────────────────────────

#[test]
fn failing_actuator_does_not_skip_the_others() {
    let mut rig = Rig::new();
    rig.hw.failing = Some(ActuatorCall::Fan(0));

    rig.cycle();

    let (light, fan, gate, alarm) = rig.trace.outputs();
    assert_eq!((light, gate, alarm), (Some(true), Some(true), Some(true)));
    assert_eq!(fan, None);
    assert!(rig.trace.events().contains(&AppEvent::ActuatorFailed {
        actuator: Actuator::Fan,
        error: ActuatorError::PwmWriteFailed,
    }));
    assert_eq!(rig.control.actuator_failures(), 1);
    // The report still ran.
    assert_eq!(rig.trace.log_lines().len(), 10);
}

// ── No cross-cycle memory ─────────────────────────────────────

#[test]
fn decisions_depend_only_on_the_current_frame() {
    let mut rig = Rig::new();
    rig.hw.queue(scenario_frame());
    rig.hw.queue(quiet_frame());
    rig.hw.queue(scenario_frame());

    let first = rig.cycle();
    let quiet = rig.cycle();
    let again = rig.cycle();

    assert_eq!(first, again);
    assert!(!quiet.decision.light_on);
    assert_eq!(quiet.decision.fan_duty, 0);
    assert!(!quiet.decision.gate_open);
    assert!(!quiet.decision.alarm_on);
    assert_eq!(rig.control.cycle_count(), 3);
}

#[test]
fn actuation_precedes_report_output() {
    let mut rig = Rig::new();
    rig.cycle();

    let ops = rig.trace.ops();
    let last_actuate = ops
        .iter()
        .rposition(|op| matches!(op, Op::Actuate(_)))
        .unwrap();
    let first_display = ops
        .iter()
        .position(|op| matches!(op, Op::Clear(_)))
        .unwrap();
    assert_eq!(ops[0], Op::Sample);
    assert!(last_actuate < first_display);
}

#[test]
fn cycle_summary_is_emitted_last() {
    let mut rig = Rig::new();
    rig.cycle();

    match rig.trace.ops().last() {
        Some(Op::Event(AppEvent::CycleCompleted(summary))) => {
            assert_eq!(summary.cycle, 1);
            assert_eq!(summary.fan_duty, 255);
            assert_eq!(summary.gas, GasSeverity::VeryHigh);
            assert_eq!(summary.sink_failures, 0);
        }
        other => panic!("expected CycleCompleted, got {other:?}"),
    }
}

#[test]
fn invalid_configuration_is_refused() {
    let mut config = SystemConfig::default();
    config.thresholds.gas_dangerous_above = config.thresholds.gas_very_high_above;
    assert!(ControlLoop::new(&config).is_err());
}
