//! Actuator drivers, board I/O lines, and hardware initialisation.

pub mod fan;
pub mod hw_init;
pub mod lines;
pub mod relay;
