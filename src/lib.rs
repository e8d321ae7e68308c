//! SmartHome firmware library.
//!
//! Exposes the control loop, decision rules, report sequencing and the
//! board adapters for integration testing and the firmware binary.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; host builds run against a simulated register bank.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod report;
pub mod sensors;
