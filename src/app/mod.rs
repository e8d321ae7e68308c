//! Application core — pure domain logic, zero I/O.
//!
//! Sequencing of one control cycle over the decision rules in
//! [`crate::control`] and the report stages in [`crate::report`].  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
