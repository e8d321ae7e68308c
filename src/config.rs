//! System configuration parameters
//!
//! All tunable parameters for the SmartHome controller: decision
//! thresholds, report/cycle timing, and the channel binding table that
//! says which physical line serves which role.  Defaults reproduce the
//! reference installation exactly; there is no persistence.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// Core system configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub thresholds: Thresholds,
    pub timing: TimingConfig,
    pub channels: ChannelMap,
}

/// Decision thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    // --- Lighting ---
    /// Light level (raw ADC) below which the room counts as dark.
    pub light_dark_below: u16,

    // --- Fan ---
    /// Temperature (°C) at or below which the fan stays off.
    pub fan_start_c: i32,
    /// Temperature (°C) at which the fan reaches full duty.
    pub fan_full_c: i32,
    /// Lowest duty the fan is driven at once running.
    pub fan_min_duty: u8,
    /// Highest fan duty.
    pub fan_max_duty: u8,

    // --- Gas (raw ADC, strict `>` comparisons) ---
    pub gas_slightly_high_above: u16,
    pub gas_dangerous_above: u16,
    pub gas_very_high_above: u16,

    // --- Gate ---
    /// Measured distance (cm) below which the gate opens.
    pub gate_open_below_cm: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            light_dark_below: 600,

            fan_start_c: 25,
            fan_full_c: 35,
            fan_min_duty: 50,
            fan_max_duty: 255,

            gas_slightly_high_above: 400,
            gas_dangerous_above: 500,
            gas_very_high_above: 800,

            gate_open_below_cm: 100.0,
        }
    }
}

/// Report and cycle timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Dwell of primary page 1 (light / temperature).
    pub primary_status_dwell_ms: u32,
    /// Dwell of primary page 2 (fan duty).
    pub primary_fan_dwell_ms: u32,
    /// Dwell of the secondary page (gate / gas).
    pub secondary_status_dwell_ms: u32,
    /// Trailing delay after the log record, before the next cycle.
    pub inter_cycle_delay_ms: u32,
    /// Startup banner hold time.
    pub banner_ms: u32,
    /// Ranging trigger settle (low) time.
    pub trigger_settle_us: u32,
    /// Ranging trigger pulse (high) width.
    pub trigger_pulse_us: u32,
    /// Deadline for the whole echo measurement, counted from the end of
    /// the trigger pulse.
    pub echo_timeout_us: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            primary_status_dwell_ms: 2000,
            primary_fan_dwell_ms: 2000,
            secondary_status_dwell_ms: 3000,
            inter_cycle_delay_ms: 1000,
            banner_ms: 2000,
            trigger_settle_us: 2,
            trigger_pulse_us: 10,
            echo_timeout_us: 30_000,
        }
    }
}

impl TimingConfig {
    /// Minimum wall-clock length of one cycle, excluding sensor time.
    /// Saturates at `u32::MAX`; [`SystemConfig::validate`] rejects timings
    /// that would get there.
    pub fn cycle_period_ms(&self) -> u32 {
        self.checked_cycle_period_ms().unwrap_or(u32::MAX)
    }

    fn checked_cycle_period_ms(&self) -> Option<u32> {
        self.primary_status_dwell_ms
            .checked_add(self.primary_fan_dwell_ms)?
            .checked_add(self.secondary_status_dwell_ms)?
            .checked_add(self.inter_cycle_delay_ms)
    }
}

/// Logical channel bindings: which physical line serves which role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap {
    pub light_adc_channel: u32,
    pub temperature_adc_channel: u32,
    pub gas_adc_channel: u32,
    pub motion_gpio: i32,
    pub ranging_trigger_gpio: i32,
    pub ranging_echo_gpio: i32,
    pub light_relay_gpio: i32,
    pub gate_motor_gpio: i32,
    pub alarm_buzzer_gpio: i32,
    pub fan_pwm_gpio: i32,
    pub fan_ledc_channel: u32,
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            light_adc_channel: pins::LIGHT_ADC_CHANNEL,
            temperature_adc_channel: pins::TEMPERATURE_ADC_CHANNEL,
            gas_adc_channel: pins::GAS_ADC_CHANNEL,
            motion_gpio: pins::MOTION_GPIO,
            ranging_trigger_gpio: pins::RANGING_TRIGGER_GPIO,
            ranging_echo_gpio: pins::RANGING_ECHO_GPIO,
            light_relay_gpio: pins::LIGHT_RELAY_GPIO,
            gate_motor_gpio: pins::GATE_MOTOR_GPIO,
            alarm_buzzer_gpio: pins::ALARM_BUZZER_GPIO,
            fan_pwm_gpio: pins::FAN_PWM_GPIO,
            fan_ledc_channel: pins::FAN_LEDC_CHANNEL,
        }
    }
}

impl ChannelMap {
    /// Digital inputs, in configuration order.
    pub fn input_gpios(&self) -> [i32; 2] {
        [self.motion_gpio, self.ranging_echo_gpio]
    }

    /// Digital outputs (excluding the PWM pin), in configuration order.
    pub fn output_gpios(&self) -> [i32; 4] {
        [
            self.ranging_trigger_gpio,
            self.light_relay_gpio,
            self.gate_motor_gpio,
            self.alarm_buzzer_gpio,
        ]
    }

    /// ADC channels, in configuration order.
    pub fn adc_channels(&self) -> [u32; 3] {
        [
            self.light_adc_channel,
            self.temperature_adc_channel,
            self.gas_adc_channel,
        ]
    }

    fn all_gpios(&self) -> [i32; 7] {
        let [a, b] = self.input_gpios();
        let [c, d, e, f] = self.output_gpios();
        [a, b, c, d, e, f, self.fan_pwm_gpio]
    }
}

impl SystemConfig {
    /// Reject values that would make the decision rules or the report
    /// cadence meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !(t.gas_slightly_high_above < t.gas_dangerous_above
            && t.gas_dangerous_above < t.gas_very_high_above)
        {
            return Err(ConfigError::ValidationFailed(
                "gas thresholds must be strictly increasing",
            ));
        }
        if t.fan_full_c <= t.fan_start_c {
            return Err(ConfigError::ValidationFailed(
                "fan_full_c must be above fan_start_c",
            ));
        }
        if t.fan_min_duty > t.fan_max_duty {
            return Err(ConfigError::ValidationFailed(
                "fan_min_duty must not exceed fan_max_duty",
            ));
        }
        if t.gate_open_below_cm.is_nan() || t.gate_open_below_cm <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "gate_open_below_cm must be positive",
            ));
        }

        let timing = &self.timing;
        if timing.primary_status_dwell_ms == 0
            || timing.primary_fan_dwell_ms == 0
            || timing.secondary_status_dwell_ms == 0
        {
            return Err(ConfigError::ValidationFailed("page dwell must be non-zero"));
        }
        if timing.trigger_pulse_us == 0 || timing.echo_timeout_us == 0 {
            return Err(ConfigError::ValidationFailed(
                "ranging pulse and timeout must be non-zero",
            ));
        }
        if timing.checked_cycle_period_ms().is_none() {
            return Err(ConfigError::ValidationFailed(
                "cycle period must fit in u32 milliseconds",
            ));
        }

        let gpios = self.channels.all_gpios();
        for (i, pin) in gpios.iter().enumerate() {
            if gpios[i + 1..].contains(pin) {
                return Err(ConfigError::PinConflict(*pin));
            }
        }
        let adc = self.channels.adc_channels();
        for (i, channel) in adc.iter().enumerate() {
            if adc[i + 1..].contains(channel) {
                return Err(ConfigError::AdcChannelConflict(*channel));
            }
        }
        Ok(())
    }
}
