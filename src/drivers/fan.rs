//! Fan motor driver (logic-level MOSFET on a PWM line).
//!
//! Duty is expressed on the 0 – 255 scale the decision rules use and
//! rescaled to whatever resolution the PWM line has.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

/// Duty scale used by callers.
pub const DUTY_FULL: u8 = u8::MAX;

pub struct Fan<P> {
    pwm: P,
    duty: u8,
}

impl<P: SetDutyCycle> Fan<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, duty: 0 }
    }

    pub fn set_duty(&mut self, duty: u8) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fraction(u16::from(duty), u16::from(DUTY_FULL))
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.duty = duty;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set_duty(0)
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    pub fn is_running(&self) -> bool {
        self.duty > 0
    }
}
