//! Hardware adapter — bridges board peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  Built from the configuration's
//! [`ChannelMap`], so no driver knows its own pin number.  On non-espidf
//! targets the lines are backed by the simulated register bank.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::{ChannelMap, SystemConfig};
use crate::drivers::fan::Fan;
use crate::drivers::lines::{AdcLine, GpioLine, PwmLine};
use crate::drivers::relay::Relay;
use crate::error::ActuatorError;
use crate::sensors::analog::{ADC_MAX, AnalogSensor};
use crate::sensors::motion::MotionSensor;
use crate::sensors::ranging::{Hcsr04, RangingTiming};
use crate::sensors::{SensorFrame, SensorHub};

use super::time::BoardClock;

/// Reported when the light ADC fails: "bright", so the light stays off.
pub const LIGHT_FALLBACK: u16 = ADC_MAX;
/// Reported when the temperature ADC fails: −50 °C, so the fan stays off.
pub const TEMPERATURE_FALLBACK: u16 = 0;
/// Reported when the gas ADC fails: full scale, so the alarm sounds.
pub const GAS_FALLBACK: u16 = ADC_MAX;

pub type BoardSensors = SensorHub<AdcLine, GpioLine, GpioLine, GpioLine, BoardClock>;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: BoardSensors,
    light: Relay<GpioLine>,
    fan: Fan<PwmLine>,
    gate: Relay<GpioLine>,
    alarm: Relay<GpioLine>,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: BoardSensors,
        light: Relay<GpioLine>,
        fan: Fan<PwmLine>,
        gate: Relay<GpioLine>,
        alarm: Relay<GpioLine>,
    ) -> Self {
        Self {
            sensor_hub,
            light,
            fan,
            gate,
            alarm,
        }
    }

    /// Bind every role to the line the configuration names.
    pub fn from_config(config: &SystemConfig, clock: BoardClock) -> Self {
        let ch: &ChannelMap = &config.channels;
        let sensor_hub = SensorHub::new(
            AnalogSensor::new(AdcLine::new(ch.light_adc_channel), "light", LIGHT_FALLBACK),
            AnalogSensor::new(
                AdcLine::new(ch.temperature_adc_channel),
                "temperature",
                TEMPERATURE_FALLBACK,
            ),
            AnalogSensor::new(AdcLine::new(ch.gas_adc_channel), "gas", GAS_FALLBACK),
            MotionSensor::new(GpioLine::new(ch.motion_gpio)),
            Hcsr04::new(
                GpioLine::new(ch.ranging_trigger_gpio),
                GpioLine::new(ch.ranging_echo_gpio),
                clock,
                RangingTiming::from(&config.timing),
            ),
        );
        Self::new(
            sensor_hub,
            Relay::new(GpioLine::new(ch.light_relay_gpio), "light relay"),
            Fan::new(PwmLine::new(ch.fan_ledc_channel)),
            Relay::new(GpioLine::new(ch.gate_motor_gpio), "gate motor"),
            Relay::new(GpioLine::new(ch.alarm_buzzer_gpio), "alarm buzzer"),
        )
    }

    /// Drive every output to its de-energised state.
    pub fn all_off(&mut self) -> Result<(), ActuatorError> {
        let fan = self.fan.stop();
        let light = self.light.set(false);
        let gate = self.gate.set(false);
        let alarm = self.alarm.set(false);
        fan.and(light).and(gate).and(alarm)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn sample(&mut self) -> SensorFrame {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_light(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.light.set(on)
    }

    fn set_fan_duty(&mut self, duty: u8) -> Result<(), ActuatorError> {
        self.fan.set_duty(duty)
    }

    fn set_gate(&mut self, open: bool) -> Result<(), ActuatorError> {
        self.gate.set(open)
    }

    fn set_alarm(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.alarm.set(on)
    }
}
