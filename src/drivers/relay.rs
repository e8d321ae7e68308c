//! On/off output driver: light relay, gate motor enable, alarm buzzer.
//!
//! HIGH = energised.  The driver remembers the last level it managed to
//! write so `is_on()` reflects the hardware, not the last request.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::error::ActuatorError;

pub struct Relay<P> {
    pin: P,
    name: &'static str,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Wrap an output line.  The line is assumed de-energised (as
    /// `hw_init` leaves every output).
    pub fn new(pin: P, name: &'static str) -> Self {
        Self {
            pin,
            name,
            on: false,
        }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let written = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        written.map_err(|_| ActuatorError::GpioWriteFailed)?;
        if self.on != on {
            debug!("{}: {}", self.name, if on { "on" } else { "off" });
        }
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
