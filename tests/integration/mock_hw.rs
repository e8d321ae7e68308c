//! Mock adapters for integration tests.
//!
//! Every port call is appended to one shared [`Trace`], so tests can
//! assert on the interleaving of sampling, actuation, display output, log
//! lines and waits across a whole cycle without touching real GPIO/PWM
//! registers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use smarthome::app::events::AppEvent;
use smarthome::app::ports::{ActuatorPort, DisplayPort, EventSink, ReportLog, SensorPort};
use smarthome::error::{ActuatorError, SinkError};
use smarthome::report::Surface;
use smarthome::sensors::SensorFrame;
use smarthome::sensors::ranging::EchoDuration;

// ── Trace ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Light(bool),
    Fan(u8),
    Gate(bool),
    Alarm(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Sample,
    Actuate(ActuatorCall),
    Clear(Surface),
    Cursor(Surface, u8, u8),
    Print(Surface, String),
    Log(String),
    Wait(u32),
    Event(AppEvent),
}

#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Op>>>);

#[allow(dead_code)]
impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn waits(&self) -> Vec<u32> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Wait(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    pub fn prints(&self, surface: Surface) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Print(s, text) if s == surface => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Log(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Event(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Last value written to each actuator, in (light, fan, gate, alarm) order.
    pub fn outputs(&self) -> (Option<bool>, Option<u8>, Option<bool>, Option<bool>) {
        let mut out = (None, None, None, None);
        for op in self.ops() {
            match op {
                Op::Actuate(ActuatorCall::Light(v)) => out.0 = Some(v),
                Op::Actuate(ActuatorCall::Fan(v)) => out.1 = Some(v),
                Op::Actuate(ActuatorCall::Gate(v)) => out.2 = Some(v),
                Op::Actuate(ActuatorCall::Alarm(v)) => out.3 = Some(v),
                _ => {}
            }
        }
        out
    }
}

// ── MockHardware ──────────────────────────────────────────────

/// Serves queued frames (repeating the last one) and records actuator writes.
pub struct MockHardware {
    trace: Trace,
    frames: VecDeque<SensorFrame>,
    last: SensorFrame,
    pub failing: Option<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(trace: &Trace, frame: SensorFrame) -> Self {
        Self {
            trace: trace.clone(),
            frames: VecDeque::new(),
            last: frame,
            failing: None,
        }
    }

    pub fn queue(&mut self, frame: SensorFrame) {
        self.frames.push_back(frame);
    }

    fn record(&mut self, call: ActuatorCall) -> Result<(), ActuatorError> {
        if self
            .failing
            .as_ref()
            .is_some_and(|f| core::mem::discriminant(f) == core::mem::discriminant(&call))
        {
            return Err(match call {
                ActuatorCall::Fan(_) => ActuatorError::PwmWriteFailed,
                _ => ActuatorError::GpioWriteFailed,
            });
        }
        self.trace.push(Op::Actuate(call));
        Ok(())
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self) -> SensorFrame {
        self.trace.push(Op::Sample);
        if let Some(frame) = self.frames.pop_front() {
            self.last = frame;
        }
        self.last
    }
}

impl ActuatorPort for MockHardware {
    fn set_light(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Light(on))
    }

    fn set_fan_duty(&mut self, duty: u8) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Fan(duty))
    }

    fn set_gate(&mut self, open: bool) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Gate(open))
    }

    fn set_alarm(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Alarm(on))
    }
}

// ── MockDisplays ──────────────────────────────────────────────

pub struct MockDisplays {
    trace: Trace,
    /// Every call on this surface fails.
    pub failing: Option<Surface>,
}

impl MockDisplays {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            failing: None,
        }
    }

    fn check(&self, surface: Surface) -> Result<(), SinkError> {
        if self.failing == Some(surface) {
            Err(SinkError::NotAcknowledged)
        } else {
            Ok(())
        }
    }
}

impl DisplayPort for MockDisplays {
    fn clear(&mut self, surface: Surface) -> Result<(), SinkError> {
        self.check(surface)?;
        self.trace.push(Op::Clear(surface));
        Ok(())
    }

    fn set_cursor(&mut self, surface: Surface, col: u8, row: u8) -> Result<(), SinkError> {
        self.check(surface)?;
        self.trace.push(Op::Cursor(surface, col, row));
        Ok(())
    }

    fn print(&mut self, surface: Surface, text: &str) -> Result<(), SinkError> {
        self.check(surface)?;
        self.trace.push(Op::Print(surface, text.to_string()));
        Ok(())
    }
}

// ── MockLog ───────────────────────────────────────────────────

pub struct MockLog {
    trace: Trace,
    pub failing: bool,
}

impl MockLog {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            failing: false,
        }
    }
}

impl ReportLog for MockLog {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        if self.failing {
            return Err(SinkError::Disconnected);
        }
        self.trace.push(Op::Log(line.to_string()));
        Ok(())
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records waits instead of sleeping.
pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Op::Wait(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Op::Wait(ms));
    }
}

// ── LogSink (EventSink) ───────────────────────────────────────

pub struct LogSink {
    trace: Trace,
}

impl LogSink {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.trace.push(Op::Event(event.clone()));
    }
}

// ── Frames ────────────────────────────────────────────────────

/// Dark room, someone present, hot, heavy gas, object at ~50 cm.
pub fn scenario_frame() -> SensorFrame {
    SensorFrame {
        light_level: 300,
        motion_detected: true,
        temperature_raw: 750,
        gas_level: 850,
        echo: EchoDuration::Micros(2900),
    }
}

/// Bright, empty, cool, clean air, nothing in range.
#[allow(dead_code)]
pub fn quiet_frame() -> SensorFrame {
    SensorFrame {
        light_level: 900,
        motion_detected: false,
        temperature_raw: 140,
        gas_level: 100,
        echo: EchoDuration::NoEcho,
    }
}
