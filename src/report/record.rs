//! The diagnostic log record: every raw value, derived value and decision
//! of one cycle, one per line, between two marker lines.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::control::Distance;

use super::CycleReport;
use super::page::{open_closed, severity_label};

/// Fits the longest line any frame can produce.
pub const LINE_CAP: usize = 48;
/// Marker line, field lines, marker line.
pub const RECORD_LINES: usize = 10;

pub const HEADER: &str = "------ Sensor Data ------";
pub const FOOTER: &str = "-------------------------";

pub type LogLine = String<LINE_CAP>;
pub type LogRecord = Vec<LogLine, RECORD_LINES>;

fn line(args: core::fmt::Arguments<'_>) -> LogLine {
    let mut l = LogLine::new();
    let _ = l.write_fmt(args);
    l
}

/// Build the record in fixed field order.
pub fn log_record(report: &CycleReport) -> LogRecord {
    let f = &report.frame;
    let d = &report.derived;
    let a = &report.decision;

    let distance = match d.distance {
        Distance::Cm(cm) => line(format_args!("Distance to Object: {:.1} cm", cm)),
        Distance::NoObject => line(format_args!("Distance to Object: none")),
    };

    let lines = [
        line(format_args!("{}", HEADER)),
        line(format_args!("Light Level: {}", f.light_level)),
        line(format_args!(
            "Motion Detected: {}",
            if f.motion_detected { "Yes" } else { "No" }
        )),
        line(format_args!("Temperature: {:.2} \u{00b0}C", d.temperature_c)),
        line(format_args!("Fan Speed: {}", a.fan_duty)),
        line(format_args!("Gas Level: {}", f.gas_level)),
        line(format_args!("Smoke Status: {}", severity_label(d.gas))),
        distance,
        line(format_args!("Gate Status: {}", open_closed(a.gate_open))),
        line(format_args!("{}", FOOTER)),
    ];

    let mut record = LogRecord::new();
    for l in lines {
        let _ = record.push(l);
    }
    record
}
