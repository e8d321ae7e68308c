//! Control rules — pure functions from one sensor frame to actuator states.

pub mod rules;

pub use rules::{ActuationDecision, DerivedFrame, Distance, GasSeverity, Rules};
