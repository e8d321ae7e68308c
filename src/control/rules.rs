//! Decision rules.
//!
//! Every function here is pure: the same [`SensorFrame`] always yields
//! the same [`DerivedFrame`] and [`ActuationDecision`].  There is no
//! hysteresis and no memory of earlier cycles.
//!
//! | Output | Rule                                                  |
//! |--------|-------------------------------------------------------|
//! | light  | `light < 600 && motion`                               |
//! | fan    | 0 at ≤ 25 °C, else 25–35 °C mapped to 50–255, clamped |
//! | gas    | `> 800` / `> 500` / `> 400` / safe                    |
//! | alarm  | `gas > 400`                                           |
//! | gate   | open iff an object is measured closer than 100 cm     |

use crate::config::Thresholds;
use crate::sensors::SensorFrame;
use crate::sensors::ranging::EchoDuration;

/// ADC full scale used by the temperature transfer function.
const ADC_FULL_SCALE: f32 = 1023.0;
/// ADC reference voltage assumed by the temperature transfer function.
const ADC_REFERENCE_V: f32 = 5.0;
/// Temperature sensor output at 0 °C.
const SENSOR_OFFSET_V: f32 = 0.5;
/// Temperature sensor scale (10 mV/°C).
const DEGREES_PER_VOLT: f32 = 100.0;
/// Speed of sound, cm/µs at ~20 °C.
const SOUND_CM_PER_US: f32 = 0.0344;

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Gas severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GasSeverity {
    Safe,
    SlightlyHigh,
    Dangerous,
    VeryHigh,
}

/// Distance to the nearest object in front of the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Cm(f32),
    /// No echo within the ranging timeout.
    NoObject,
}

/// Engineering-unit values computed once per cycle from a [`SensorFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFrame {
    pub temperature_c: f32,
    pub distance: Distance,
    pub gas: GasSeverity,
}

/// What every actuator should do this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationDecision {
    pub light_on: bool,
    /// Fan PWM duty: 0 (off) or within the configured running range.
    pub fan_duty: u8,
    pub gate_open: bool,
    pub alarm_on: bool,
}

/// Linear transfer function of the analog temperature sensor.
pub fn derive_temperature(raw: u16) -> f32 {
    let voltage = f32::from(raw) * (ADC_REFERENCE_V / ADC_FULL_SCALE);
    (voltage - SENSOR_OFFSET_V) * DEGREES_PER_VOLT
}

/// Convert an echo round-trip time to a one-way distance.
pub fn derive_distance(echo: EchoDuration) -> Distance {
    match echo {
        EchoDuration::Micros(us) => Distance::Cm(us as f32 * SOUND_CM_PER_US / 2.0),
        EchoDuration::NoEcho => Distance::NoObject,
    }
}

/// Integer linear re-mapping, truncating like the classic `map()` helper.
fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i64 {
    let (x, in_min, in_max) = (i64::from(x), i64::from(in_min), i64::from(in_max));
    let (out_min, out_max) = (i64::from(out_min), i64::from(out_max));
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

// ---------------------------------------------------------------------------
// Rule set
// ---------------------------------------------------------------------------

/// The decision rules, parameterised by [`Thresholds`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Rules {
    thresholds: Thresholds,
}

impl Rules {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Light on only when it is dark **and** someone is there.
    pub fn decide_light(&self, light_level: u16, motion_detected: bool) -> bool {
        light_level < self.thresholds.light_dark_below && motion_detected
    }

    /// Fan duty for a temperature.
    ///
    /// The temperature is truncated to whole degrees before mapping, so
    /// 30.0 °C and 30.9 °C both give 152.  Anything at or below the start
    /// temperature (or NaN) turns the fan off.
    pub fn decide_fan_speed(&self, temperature_c: f32) -> u8 {
        let t = &self.thresholds;
        if temperature_c.is_nan() || temperature_c <= t.fan_start_c as f32 {
            return 0;
        }
        let (min, max) = (i32::from(t.fan_min_duty), i32::from(t.fan_max_duty));
        let duty = map_range(temperature_c as i32, t.fan_start_c, t.fan_full_c, min, max);
        duty.clamp(i64::from(min), i64::from(max)) as u8
    }

    /// Checked from the most severe band down; a level equal to a
    /// threshold belongs to the band below it.
    pub fn classify_gas(&self, gas_level: u16) -> GasSeverity {
        let t = &self.thresholds;
        if gas_level > t.gas_very_high_above {
            GasSeverity::VeryHigh
        } else if gas_level > t.gas_dangerous_above {
            GasSeverity::Dangerous
        } else if gas_level > t.gas_slightly_high_above {
            GasSeverity::SlightlyHigh
        } else {
            GasSeverity::Safe
        }
    }

    /// The alarm sounds from the first elevated band upward.
    pub fn decide_alarm(&self, gas_level: u16) -> bool {
        gas_level > self.thresholds.gas_slightly_high_above
    }

    /// Open only for a measured object inside the threshold.  No echo keeps
    /// the gate closed.
    pub fn decide_gate(&self, distance: Distance) -> bool {
        match distance {
            Distance::Cm(cm) => cm < self.thresholds.gate_open_below_cm,
            Distance::NoObject => false,
        }
    }

    pub fn derive(&self, frame: &SensorFrame) -> DerivedFrame {
        DerivedFrame {
            temperature_c: derive_temperature(frame.temperature_raw),
            distance: derive_distance(frame.echo),
            gas: self.classify_gas(frame.gas_level),
        }
    }

    pub fn decide(&self, frame: &SensorFrame, derived: &DerivedFrame) -> ActuationDecision {
        ActuationDecision {
            light_on: self.decide_light(frame.light_level, frame.motion_detected),
            fan_duty: self.decide_fan_speed(derived.temperature_c),
            gate_open: self.decide_gate(derived.distance),
            alarm_on: self.decide_alarm(frame.gas_level),
        }
    }
}
