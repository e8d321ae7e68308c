//! Analog inputs: photoresistor, temperature sensor, gas sensor.
//!
//! All three share the same shape: one ADC channel, a 10-bit reading,
//! and a fallback value used when the conversion fails.  Readings above
//! the 10-bit full scale are clamped so downstream rules never see a value
//! outside 0 – 1023.

use log::warn;

use crate::error::SensorError;

/// Full-scale value of a 10-bit conversion.
pub const ADC_MAX: u16 = 1023;

/// One ADC channel.  Implemented by the board's oneshot ADC line and by
/// test doubles.
pub trait AnalogInput {
    /// Read a 10-bit sample (0 – 1023).
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        (**self).read_raw()
    }
}

/// A named analog sensor with a fail-safe fallback reading.
pub struct AnalogSensor<A> {
    input: A,
    name: &'static str,
    fallback: u16,
}

impl<A: AnalogInput> AnalogSensor<A> {
    /// `fallback` is reported whenever the ADC read fails; pick the value
    /// whose downstream decision is the safe one for this input.
    pub fn new(input: A, name: &'static str, fallback: u16) -> Self {
        Self {
            input,
            name,
            fallback: fallback.min(ADC_MAX),
        }
    }

    pub fn read(&mut self) -> u16 {
        match self.input.read_raw() {
            Ok(raw) if raw > ADC_MAX => {
                warn!("{}: reading {} above full scale, clamped", self.name, raw);
                ADC_MAX
            }
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}: {} — using fallback {}", self.name, e, self.fallback);
                self.fallback
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
