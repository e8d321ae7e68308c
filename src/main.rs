//! SmartHome Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   TextGridDisplays   LogReport   LogEventSink │
//! │  (Sensor+Actuator) (DisplayPort)      (ReportLog) (EventSink)  │
//! │  BoardClock (MonotonicClock + DelayNs)                         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlLoop (pure sequencing)                │    │
//! │  │  Rules · ReportSequencer                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use smarthome::adapters::hardware::HardwareAdapter;
use smarthome::adapters::log_sink::{LogEventSink, LogReport};
use smarthome::adapters::text_grid::TextGridDisplays;
use smarthome::adapters::time::BoardClock;
use smarthome::app::service::ControlLoop;
use smarthome::config::SystemConfig;
use smarthome::drivers::hw_init;
use smarthome::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartHome v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compiled-in defaults, no persistence) ──
    let config = SystemConfig::default();
    let mut control = ControlLoop::new(&config).map_err(Error::from)?;

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals(&config.channels) {
        // Without its I/O lines the loop would only ever act on fallbacks.
        error!("HAL init failed: {}", e);
        return Err(Error::from(e).into());
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut clock = BoardClock::new();
    let mut hw = HardwareAdapter::from_config(&config, clock);
    let mut displays = TextGridDisplays::new();
    let mut report_log = LogReport::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. Banner, then cycles forever ────────────────────────
    control.boot(&mut displays, &mut clock, &mut log_sink);
    info!("System ready. Entering control loop.");
    control.run(
        &mut hw,
        &mut displays,
        &mut report_log,
        &mut clock,
        &mut log_sink,
    )
}
