//! HC-SR04 ultrasonic ranging with a bounded echo wait.
//!
//! Protocol: hold TRIG low for the settle time, raise it for the pulse
//! width (10 µs), drop it, then time the HIGH pulse on ECHO.  The echo
//! width is the round-trip time of flight.
//!
//! The whole measurement shares one deadline (`echo_timeout_us` after the
//! trigger falls): a sensor that is unplugged, pointed at open space, or
//! stuck HIGH yields [`SensorError::EchoTimeout`] instead of hanging the
//! control loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;

/// Monotonic microsecond time source used to time the echo pulse.
pub trait MonotonicClock {
    fn now_us(&self) -> u64;
}

/// Raw echo measurement carried in the sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoDuration {
    /// Width of the echo pulse.
    Micros(u32),
    /// No complete echo within the timeout.
    NoEcho,
}

impl EchoDuration {
    pub fn micros(self) -> Option<u32> {
        match self {
            Self::Micros(us) => Some(us),
            Self::NoEcho => None,
        }
    }
}

impl From<Result<u32, SensorError>> for EchoDuration {
    fn from(r: Result<u32, SensorError>) -> Self {
        r.map_or(Self::NoEcho, Self::Micros)
    }
}

/// Ranging timing parameters.
#[derive(Debug, Clone, Copy)]
pub struct RangingTiming {
    pub settle_us: u32,
    pub pulse_us: u32,
    pub timeout_us: u32,
}

impl From<&crate::config::TimingConfig> for RangingTiming {
    fn from(t: &crate::config::TimingConfig) -> Self {
        Self {
            settle_us: t.trigger_settle_us,
            pulse_us: t.trigger_pulse_us,
            timeout_us: t.echo_timeout_us,
        }
    }
}

pub struct Hcsr04<T, E, C> {
    trigger: T,
    echo: E,
    clock: C,
    timing: RangingTiming,
}

impl<T, E, C> Hcsr04<T, E, C>
where
    T: OutputPin,
    E: InputPin,
    C: MonotonicClock + DelayNs,
{
    pub fn new(trigger: T, echo: E, clock: C, timing: RangingTiming) -> Self {
        Self {
            trigger,
            echo,
            clock,
            timing,
        }
    }

    /// Fire one ping and return the echo pulse width in microseconds.
    pub fn measure(&mut self) -> Result<u32, SensorError> {
        self.fire_trigger()?;

        let deadline = self.clock.now_us() + u64::from(self.timing.timeout_us);

        // A previous ping's echo may still be HIGH; let it finish first.
        while self.echo_high()? {
            self.check_deadline(deadline)?;
        }
        while !self.echo_high()? {
            self.check_deadline(deadline)?;
        }
        let rise = self.clock.now_us();
        while self.echo_high()? {
            self.check_deadline(deadline)?;
        }
        let width = self.clock.now_us().saturating_sub(rise);
        Ok(width.min(u64::from(u32::MAX)) as u32)
    }

    fn fire_trigger(&mut self) -> Result<(), SensorError> {
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerFailed)?;
        self.clock.delay_us(self.timing.settle_us);
        self.trigger
            .set_high()
            .map_err(|_| SensorError::TriggerFailed)?;
        self.clock.delay_us(self.timing.pulse_us);
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerFailed)
    }

    fn echo_high(&mut self) -> Result<bool, SensorError> {
        self.echo.is_high().map_err(|_| SensorError::GpioReadFailed)
    }

    fn check_deadline(&self, deadline: u64) -> Result<(), SensorError> {
        if self.clock.now_us() >= deadline {
            Err(SensorError::EchoTimeout)
        } else {
            Ok(())
        }
    }
}
