//! Report sequencing — the per-cycle presentation of a decision.
//!
//! A cycle's report is a fixed sequence of stages:
//!
//! ```text
//!  PrimaryStatus ──▶ PrimaryFan ──▶ SecondaryStatus ──▶ Log
//!    (2000 ms)        (2000 ms)        (3000 ms)
//! ```
//!
//! Every stage runs exactly once per cycle, whatever the decision says
//! and whether or not an earlier stage's sink failed.  A failed stage is
//! abandoned (the rest of its rows or lines are not written) but its
//! dwell still elapses, so the cycle period does not depend on sink
//! health.

pub mod page;
pub mod record;

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::{DisplayPort, EventSink, ReportLog};
use crate::config::TimingConfig;
use crate::control::{ActuationDecision, DerivedFrame};
use crate::error::SinkError;
use crate::sensors::SensorFrame;

use page::{ReportPage, build_pages};
use record::log_record;

/// Startup banner text, one line per surface.
pub const BANNER_PRIMARY: &str = "Smart Home LCD1";
pub const BANNER_SECONDARY: &str = "Smart Home LCD2";

/// One of the two character displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Primary,
    Secondary,
}

impl core::fmt::Display for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// A unit of report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportStage {
    /// Startup banner; shown once by `show_banner`, never part of a cycle.
    Banner,
    PrimaryStatus,
    PrimaryFan,
    SecondaryStatus,
    Log,
}

impl ReportStage {
    /// The stages of one cycle, in the order they run.
    pub const CYCLE: [ReportStage; 4] = [
        ReportStage::PrimaryStatus,
        ReportStage::PrimaryFan,
        ReportStage::SecondaryStatus,
        ReportStage::Log,
    ];
}

impl core::fmt::Display for ReportStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Banner => write!(f, "banner"),
            Self::PrimaryStatus => write!(f, "primary status page"),
            Self::PrimaryFan => write!(f, "primary fan page"),
            Self::SecondaryStatus => write!(f, "secondary status page"),
            Self::Log => write!(f, "log record"),
        }
    }
}

/// Everything a cycle produced, handed to the report stages by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub frame: SensorFrame,
    pub derived: DerivedFrame,
    pub decision: ActuationDecision,
}

/// Per-stage result of one report run, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub stages: [(ReportStage, Result<(), SinkError>); 4],
}

impl ReportOutcome {
    pub fn failures(&self) -> usize {
        self.stages.iter().filter(|(_, r)| r.is_err()).count()
    }
}

/// Drives the report stages for each cycle.
#[derive(Debug, Clone)]
pub struct ReportSequencer {
    timing: TimingConfig,
}

impl ReportSequencer {
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Show the banner on both surfaces and hold it for `banner_ms`.
    pub fn show_banner(
        &self,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        for (surface, text) in [
            (Surface::Primary, BANNER_PRIMARY),
            (Surface::Secondary, BANNER_SECONDARY),
        ] {
            let shown = display
                .clear(surface)
                .and_then(|()| display.set_cursor(surface, 0, 0))
                .and_then(|()| display.print(surface, text));
            if let Err(e) = shown {
                Self::stage_failed(ReportStage::Banner, e, sink);
            }
        }
        delay.delay_ms(self.timing.banner_ms);
    }

    /// Run the four stages of one cycle.
    pub fn run(
        &self,
        report: &CycleReport,
        display: &mut impl DisplayPort,
        log: &mut impl ReportLog,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ReportOutcome {
        let [p1, p2, p3] = build_pages(report, &self.timing);

        let s1 = self.show_page(&p1, display, delay, sink);
        let s2 = self.show_page(&p2, display, delay, sink);
        let s3 = self.show_page(&p3, display, delay, sink);
        let s4 = Self::write_record(report, log);
        if let Err(e) = s4 {
            Self::stage_failed(ReportStage::Log, e, sink);
        }

        ReportOutcome {
            stages: [
                (p1.stage, s1),
                (p2.stage, s2),
                (p3.stage, s3),
                (ReportStage::Log, s4),
            ],
        }
    }

    fn show_page(
        &self,
        page: &ReportPage,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<(), SinkError> {
        let result = Self::render(page, display);
        if let Err(e) = result {
            Self::stage_failed(page.stage, e, sink);
        }
        delay.delay_ms(page.dwell_ms);
        result
    }

    fn render(page: &ReportPage, display: &mut impl DisplayPort) -> Result<(), SinkError> {
        display.clear(page.surface)?;
        for (row, text) in page.rows().iter().enumerate() {
            display.set_cursor(page.surface, 0, row as u8)?;
            display.print(page.surface, text)?;
        }
        Ok(())
    }

    fn write_record(report: &CycleReport, log: &mut impl ReportLog) -> Result<(), SinkError> {
        for line in log_record(report).iter() {
            log.write_line(line)?;
        }
        Ok(())
    }

    fn stage_failed(stage: ReportStage, error: SinkError, sink: &mut impl EventSink) {
        warn!("report: {} abandoned: {}", stage, error);
        sink.emit(&AppEvent::SinkFailed { stage, error });
    }
}
