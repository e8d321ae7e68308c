//! Board I/O lines as `embedded-hal` types.
//!
//! [`GpioLine`], [`AdcLine`] and [`PwmLine`] wrap one GPIO number, ADC1
//! channel or LEDC channel from the [`ChannelMap`](crate::config::ChannelMap).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `gpio_*`, `adc_oneshot_*` and `ledc_*` calls on
//! peripherals configured by [`hw_init`](super::hw_init).
//! On host/test: an in-memory register bank ([`sim`]) that tests and the
//! simulation binary can poke from the outside.

use embedded_hal::digital::{self, ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::error::SensorError;
use crate::pins::PWM_RESOLUTION_BITS;
use crate::sensors::analog::AnalogInput;

/// Error from a raw line access; carries the ESP-IDF return code (or the
/// offending pin/channel number in simulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError(pub i32);

impl digital::Error for LineError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl pwm::Error for LineError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

// ── GPIO ──────────────────────────────────────────────────────

/// One GPIO, used as an input or an output depending on how `hw_init`
/// configured it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioLine {
    pin: i32,
}

impl GpioLine {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for GpioLine {
    type Error = LineError;
}

#[cfg(target_os = "espidf")]
impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        // SAFETY: register write on a pin configured as output by hw_init.
        esp_check(unsafe { esp_idf_svc::sys::gpio_set_level(self.pin, 0) })
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        // SAFETY: as above.
        esp_check(unsafe { esp_idf_svc::sys::gpio_set_level(self.pin, 1) })
    }
}

#[cfg(target_os = "espidf")]
impl InputPin for GpioLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        // SAFETY: read-only register access.
        Ok(unsafe { esp_idf_svc::sys::gpio_get_level(self.pin) } != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

#[cfg(not(target_os = "espidf"))]
impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        sim::write_gpio(self.pin, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        sim::write_gpio(self.pin, true)
    }
}

#[cfg(not(target_os = "espidf"))]
impl InputPin for GpioLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        sim::read_gpio(self.pin)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

// ── ADC ───────────────────────────────────────────────────────

/// One ADC1 oneshot channel, scaled to the 10-bit domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcLine {
    channel: u32,
}

impl AdcLine {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

#[cfg(target_os = "espidf")]
impl AnalogInput for AdcLine {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        let mut raw: i32 = 0;
        // SAFETY: adc1_handle() contract — single-threaded loop access only.
        let ret = unsafe {
            esp_idf_svc::sys::adc_oneshot_read(super::hw_init::adc1_handle(), self.channel, &mut raw)
        };
        if ret != esp_idf_svc::sys::ESP_OK as i32 {
            return Err(SensorError::AdcReadFailed);
        }
        // 12-bit conversion → 10-bit scale the rules are written for.
        Ok((raw.max(0) as u16) >> 2)
    }
}

#[cfg(not(target_os = "espidf"))]
impl AnalogInput for AdcLine {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        sim::read_adc(self.channel).ok_or(SensorError::AdcReadFailed)
    }
}

// ── LEDC PWM ──────────────────────────────────────────────────

/// One LEDC channel at [`PWM_RESOLUTION_BITS`] resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmLine {
    channel: u32,
}

impl PwmLine {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl pwm::ErrorType for PwmLine {
    type Error = LineError;
}

impl SetDutyCycle for PwmLine {
    fn max_duty_cycle(&self) -> u16 {
        (1u16 << PWM_RESOLUTION_BITS) - 1
    }

    #[cfg(target_os = "espidf")]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        use esp_idf_svc::sys::{ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_set_duty, ledc_update_duty};
        // SAFETY: channel configured by hw_init; only the control loop writes it.
        esp_check(unsafe {
            ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.channel, u32::from(duty))
        })?;
        esp_check(unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.channel) })
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        sim::write_ledc(self.channel, duty)
    }
}

#[cfg(target_os = "espidf")]
fn esp_check(ret: esp_idf_svc::sys::esp_err_t) -> Result<(), LineError> {
    if ret == esp_idf_svc::sys::ESP_OK as i32 {
        Ok(())
    } else {
        Err(LineError(ret))
    }
}

// ── Host simulation bank ──────────────────────────────────────

/// In-memory stand-in for the GPIO, ADC and LEDC registers.
///
/// Lines outside the bank fail with [`LineError`] carrying the number, the
/// same way a misconfigured pin fails on the device.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

    use super::LineError;

    pub const GPIO_COUNT: usize = 49;
    pub const ADC_CHANNELS: usize = 10;
    pub const LEDC_CHANNELS: usize = 8;

    /// Marks an ADC channel whose conversion should fail.
    const ADC_FAULT: u16 = u16::MAX;

    static GPIO: [AtomicBool; GPIO_COUNT] = [const { AtomicBool::new(false) }; GPIO_COUNT];
    static ADC: [AtomicU16; ADC_CHANNELS] = [const { AtomicU16::new(0) }; ADC_CHANNELS];
    static LEDC: [AtomicU16; LEDC_CHANNELS] = [const { AtomicU16::new(0) }; LEDC_CHANNELS];

    fn gpio(pin: i32) -> Result<&'static AtomicBool, LineError> {
        usize::try_from(pin)
            .ok()
            .and_then(|i| GPIO.get(i))
            .ok_or(LineError(pin))
    }

    pub fn write_gpio(pin: i32, high: bool) -> Result<(), LineError> {
        gpio(pin)?.store(high, Ordering::Relaxed);
        Ok(())
    }

    pub fn read_gpio(pin: i32) -> Result<bool, LineError> {
        Ok(gpio(pin)?.load(Ordering::Relaxed))
    }

    /// Set the value the next conversion on `channel` returns.
    pub fn set_adc(channel: u32, raw: u16) {
        if let Some(slot) = ADC.get(channel as usize) {
            slot.store(raw, Ordering::Relaxed);
        }
    }

    /// Make every following conversion on `channel` fail.
    pub fn fail_adc(channel: u32) {
        set_adc(channel, ADC_FAULT);
    }

    pub fn read_adc(channel: u32) -> Option<u16> {
        ADC.get(channel as usize)
            .map(|slot| slot.load(Ordering::Relaxed))
            .filter(|&raw| raw != ADC_FAULT)
    }

    pub fn write_ledc(channel: u32, duty: u16) -> Result<(), LineError> {
        let slot = LEDC
            .get(channel as usize)
            .ok_or(LineError(channel as i32))?;
        slot.store(duty, Ordering::Relaxed);
        Ok(())
    }

    pub fn ledc_duty(channel: u32) -> Option<u16> {
        LEDC.get(channel as usize).map(|slot| slot.load(Ordering::Relaxed))
    }
}
