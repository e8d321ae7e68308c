//! Display pages: what each surface shows, and for how long.
//!
//! Values are turned into text here and nowhere earlier; the decision
//! layer only ever deals in booleans, numbers and [`GasSeverity`].

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::TimingConfig;
use crate::control::GasSeverity;
use crate::pins::LCD_ROWS;

use super::{CycleReport, ReportStage, Surface};

/// Capacity of one rendered field value.
pub const VALUE_CAP: usize = 16;
/// Capacity of one rendered display row (before the surface clips it).
pub const ROW_CAP: usize = 32;

pub type FieldValue = String<VALUE_CAP>;
pub type RowText = String<ROW_CAP>;

/// How a page's fields are arranged on the two display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    /// One `Label: value` field per row.
    Inline,
    /// A single field: `Label:` on row 0, the value on row 1.
    Stacked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPage {
    pub stage: ReportStage,
    pub surface: Surface,
    pub layout: PageLayout,
    pub fields: Vec<Field, LCD_ROWS>,
    pub dwell_ms: u32,
}

impl ReportPage {
    /// Row texts in display order.
    pub fn rows(&self) -> Vec<RowText, LCD_ROWS> {
        let mut rows = Vec::new();
        match self.layout {
            PageLayout::Inline => {
                for field in &self.fields {
                    let mut row = RowText::new();
                    let _ = write!(row, "{}: {}", field.label, field.value);
                    let _ = rows.push(row);
                }
            }
            PageLayout::Stacked => {
                if let Some(field) = self.fields.first() {
                    let mut label = RowText::new();
                    let _ = write!(label, "{}:", field.label);
                    let mut value = RowText::new();
                    let _ = value.push_str(&field.value);
                    let _ = rows.push(label);
                    let _ = rows.push(value);
                }
            }
        }
        rows
    }
}

/// Display label for a gas severity.
pub fn severity_label(severity: GasSeverity) -> &'static str {
    match severity {
        GasSeverity::Safe => "SAFE",
        GasSeverity::SlightlyHigh => "SLIGHTLY HIGH",
        GasSeverity::Dangerous => "DANGEROUS",
        GasSeverity::VeryHigh => "VERY HIGH",
    }
}

pub fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

pub fn open_closed(open: bool) -> &'static str {
    if open { "OPEN" } else { "CLOSED" }
}

fn field(label: &'static str, args: core::fmt::Arguments<'_>) -> Field {
    let mut value = FieldValue::new();
    let _ = value.write_fmt(args);
    Field { label, value }
}

fn page(
    stage: ReportStage,
    surface: Surface,
    layout: PageLayout,
    fields: &[Field],
    dwell_ms: u32,
) -> ReportPage {
    let mut v = Vec::new();
    for f in fields.iter().take(LCD_ROWS) {
        let _ = v.push(f.clone());
    }
    ReportPage {
        stage,
        surface,
        layout,
        fields: v,
        dwell_ms,
    }
}

/// The three display pages of one cycle, in presentation order.
pub fn build_pages(report: &CycleReport, timing: &TimingConfig) -> [ReportPage; 3] {
    let d = &report.decision;
    [
        page(
            ReportStage::PrimaryStatus,
            Surface::Primary,
            PageLayout::Inline,
            &[
                field("Light", format_args!("{}", on_off(d.light_on))),
                field("Temp", format_args!("{:.1}C", report.derived.temperature_c)),
            ],
            timing.primary_status_dwell_ms,
        ),
        page(
            ReportStage::PrimaryFan,
            Surface::Primary,
            PageLayout::Stacked,
            &[field("Fan Speed", format_args!("{}", d.fan_duty))],
            timing.primary_fan_dwell_ms,
        ),
        page(
            ReportStage::SecondaryStatus,
            Surface::Secondary,
            PageLayout::Inline,
            &[
                field("Gate", format_args!("{}", open_closed(d.gate_open))),
                field("Gas", format_args!("{}", severity_label(report.derived.gas))),
            ],
            timing.secondary_status_dwell_ms,
        ),
    ]
}
