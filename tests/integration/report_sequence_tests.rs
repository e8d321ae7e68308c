//! Integration tests for report sequencing: stage order, dwell timing,
//! the startup banner, and sink failure isolation.

use smarthome::app::events::AppEvent;
use smarthome::app::service::ControlLoop;
use smarthome::config::SystemConfig;
use smarthome::error::SinkError;
use smarthome::report::{ReportStage, Surface};

use crate::mock_hw::{
    LogSink, MockDelay, MockDisplays, MockHardware, MockLog, Op, Trace, quiet_frame,
    scenario_frame,
};

/// Reduce a trace to stage markers: which surface was cleared, where the
/// log record started, and every wait.
fn stage_markers(ops: &[Op]) -> Vec<String> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Sample => Some("sample".to_string()),
            Op::Clear(Surface::Primary) => Some("primary".to_string()),
            Op::Clear(Surface::Secondary) => Some("secondary".to_string()),
            Op::Log(line) if line.starts_with("------ Sensor Data") => Some("log".to_string()),
            Op::Wait(ms) => Some(format!("wait {ms}")),
            _ => None,
        })
        .collect()
}

fn run_cycles(config: &SystemConfig, frames: &[smarthome::sensors::SensorFrame]) -> Trace {
    let trace = Trace::new();
    let mut control = ControlLoop::new(config).unwrap();
    let mut hw = MockHardware::new(&trace, frames[0]);
    for f in frames {
        hw.queue(*f);
    }
    let mut displays = MockDisplays::new(&trace);
    let mut log = MockLog::new(&trace);
    let mut delay = MockDelay::new(&trace);
    let mut sink = LogSink::new(&trace);
    for _ in frames {
        control.run_cycle(&mut hw, &mut displays, &mut log, &mut delay, &mut sink);
    }
    trace
}

#[test]
fn stages_fire_in_fixed_order_once_per_cycle() {
    // Very different decisions in the two cycles; the sequence must not care.
    let trace = run_cycles(&SystemConfig::default(), &[scenario_frame(), quiet_frame()]);

    let one_cycle = [
        "sample",
        "primary",
        "wait 2000",
        "primary",
        "wait 2000",
        "secondary",
        "wait 3000",
        "log",
        "wait 1000",
    ];
    let expected: Vec<&str> = one_cycle.iter().chain(one_cycle.iter()).copied().collect();
    assert_eq!(stage_markers(&trace.ops()), expected);
}

#[test]
fn page_render_is_clear_then_cursor_and_print_per_row() {
    let trace = run_cycles(&SystemConfig::default(), &[quiet_frame()]);
    let display_ops: Vec<Op> = trace
        .ops()
        .into_iter()
        .filter(|op| matches!(op, Op::Clear(_) | Op::Cursor(..) | Op::Print(..)))
        .take(5)
        .collect();
    assert_eq!(
        display_ops,
        [
            Op::Clear(Surface::Primary),
            Op::Cursor(Surface::Primary, 0, 0),
            Op::Print(Surface::Primary, "Light: OFF".to_string()),
            Op::Cursor(Surface::Primary, 0, 1),
            Op::Print(Surface::Primary, "Temp: 18.4C".to_string()),
        ]
    );
}

#[test]
fn configured_timing_is_honoured() {
    let mut config = SystemConfig::default();
    config.timing.primary_status_dwell_ms = 10;
    config.timing.primary_fan_dwell_ms = 20;
    config.timing.secondary_status_dwell_ms = 30;
    config.timing.inter_cycle_delay_ms = 5;

    let trace = run_cycles(&config, &[quiet_frame()]);
    assert_eq!(trace.waits(), [10, 20, 30, 5]);
}

// ── Sink failures ─────────────────────────────────────────────

#[test]
fn failing_display_does_not_starve_the_others() {
    let trace = Trace::new();
    let mut control = ControlLoop::new(&SystemConfig::default()).unwrap();
    let mut hw = MockHardware::new(&trace, scenario_frame());
    let mut displays = MockDisplays::new(&trace);
    displays.failing = Some(Surface::Primary);
    let mut log = MockLog::new(&trace);
    let mut delay = MockDelay::new(&trace);
    let mut sink = LogSink::new(&trace);

    control.run_cycle(&mut hw, &mut displays, &mut log, &mut delay, &mut sink);

    assert!(trace.prints(Surface::Primary).is_empty());
    assert_eq!(
        trace.prints(Surface::Secondary),
        ["Gate: OPEN", "Gas: VERY HIGH"]
    );
    assert_eq!(trace.log_lines().len(), 10);
    // Cadence is unchanged.
    assert_eq!(trace.waits(), [2000, 2000, 3000, 1000]);

    let failures: Vec<AppEvent> = trace
        .events()
        .into_iter()
        .filter(|e| matches!(e, AppEvent::SinkFailed { .. }))
        .collect();
    assert_eq!(
        failures,
        [
            AppEvent::SinkFailed {
                stage: ReportStage::PrimaryStatus,
                error: SinkError::NotAcknowledged,
            },
            AppEvent::SinkFailed {
                stage: ReportStage::PrimaryFan,
                error: SinkError::NotAcknowledged,
            },
        ]
    );
    assert_eq!(control.sink_failures(), 2);
}

#[test]
fn failing_log_still_shows_every_page_and_next_cycle_runs() {
    let trace = Trace::new();
    let mut control = ControlLoop::new(&SystemConfig::default()).unwrap();
    let mut hw = MockHardware::new(&trace, quiet_frame());
    let mut displays = MockDisplays::new(&trace);
    let mut log = MockLog::new(&trace);
    log.failing = true;
    let mut delay = MockDelay::new(&trace);
    let mut sink = LogSink::new(&trace);

    control.run_cycle(&mut hw, &mut displays, &mut log, &mut delay, &mut sink);
    control.run_cycle(&mut hw, &mut displays, &mut log, &mut delay, &mut sink);

    assert_eq!(trace.prints(Surface::Primary).len(), 8);
    assert_eq!(trace.prints(Surface::Secondary).len(), 4);
    assert!(trace.events().contains(&AppEvent::SinkFailed {
        stage: ReportStage::Log,
        error: SinkError::Disconnected,
    }));
    assert_eq!(control.cycle_count(), 2);
    assert_eq!(control.sink_failures(), 2);
}

// ── Banner ────────────────────────────────────────────────────

#[test]
fn banner_precedes_first_cycle_on_both_surfaces() {
    let trace = Trace::new();
    let mut control = ControlLoop::new(&SystemConfig::default()).unwrap();
    let mut hw = MockHardware::new(&trace, quiet_frame());
    let mut displays = MockDisplays::new(&trace);
    let mut log = MockLog::new(&trace);
    let mut delay = MockDelay::new(&trace);
    let mut sink = LogSink::new(&trace);

    control.boot(&mut displays, &mut delay, &mut sink);
    control.run_cycle(&mut hw, &mut displays, &mut log, &mut delay, &mut sink);

    let ops = trace.ops();
    assert_eq!(
        ops[..8],
        [
            Op::Clear(Surface::Primary),
            Op::Cursor(Surface::Primary, 0, 0),
            Op::Print(Surface::Primary, "Smart Home LCD1".to_string()),
            Op::Clear(Surface::Secondary),
            Op::Cursor(Surface::Secondary, 0, 0),
            Op::Print(Surface::Secondary, "Smart Home LCD2".to_string()),
            Op::Wait(2000),
            Op::Event(AppEvent::Started {
                cycle_period_ms: 8000
            }),
        ]
    );
    assert_eq!(ops[8], Op::Sample);
}
