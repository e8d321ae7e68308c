//! PIR motion sensor.
//!
//! HC-SR501-style module with a digital output: HIGH while motion is
//! detected (the module's own retrigger timer stretches the pulse).  A pin
//! error reads as "no motion", which keeps the light off.

use embedded_hal::digital::InputPin;
use log::warn;

pub struct MotionSensor<P> {
    pin: P,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn read(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("motion: GPIO read failed ({:?}), reporting no motion", e);
                false
            }
        }
    }
}
