//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a fresh [`SensorFrame`]
//! each cycle.  Nothing is cached between samples: a failed read is
//! replaced by that input's fail-safe value, never by the previous reading.

pub mod analog;
pub mod motion;
pub mod ranging;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, warn};

use crate::error::SensorError;
use analog::{AnalogInput, AnalogSensor};
use motion::MotionSensor;
use ranging::{EchoDuration, Hcsr04, MonotonicClock};

/// One cycle's raw readings.  Owned by the cycle that sampled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFrame {
    /// Photoresistor level (0 – 1023, higher = brighter).
    pub light_level: u16,
    pub motion_detected: bool,
    /// Temperature sensor ADC reading (0 – 1023).
    pub temperature_raw: u16,
    /// Gas sensor level (0 – 1023).
    pub gas_level: u16,
    pub echo: EchoDuration,
}

/// Aggregates all sensor drivers and produces a unified frame.
pub struct SensorHub<A, M, T, E, C> {
    pub light: AnalogSensor<A>,
    pub temperature: AnalogSensor<A>,
    pub gas: AnalogSensor<A>,
    pub motion: MotionSensor<M>,
    pub ranger: Hcsr04<T, E, C>,
}

impl<A, M, T, E, C> SensorHub<A, M, T, E, C>
where
    A: AnalogInput,
    M: InputPin,
    T: OutputPin,
    E: InputPin,
    C: MonotonicClock + DelayNs,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(
        light: AnalogSensor<A>,
        temperature: AnalogSensor<A>,
        gas: AnalogSensor<A>,
        motion: MotionSensor<M>,
        ranger: Hcsr04<T, E, C>,
    ) -> Self {
        Self {
            light,
            temperature,
            gas,
            motion,
            ranger,
        }
    }

    /// Read every sensor and return a unified frame.
    pub fn read_all(&mut self) -> SensorFrame {
        let light_level = self.light.read();
        let motion_detected = self.motion.read();
        let temperature_raw = self.temperature.read();
        let gas_level = self.gas.read();

        let echo = match self.ranger.measure() {
            Ok(us) => EchoDuration::Micros(us),
            Err(SensorError::EchoTimeout) => {
                debug!("ranging: no echo within timeout");
                EchoDuration::NoEcho
            }
            Err(e) => {
                warn!("ranging: {}, treating as no echo", e);
                EchoDuration::NoEcho
            }
        };

        SensorFrame {
            light_level,
            motion_detected,
            temperature_raw,
            gas_level,
            echo,
        }
    }
}
