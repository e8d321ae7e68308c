//! Default GPIO / ADC channel assignments for the SmartHome main board.
//!
//! These constants seed [`ChannelMap::default`](crate::config::ChannelMap);
//! drivers never reference them directly, so a board revision only needs a
//! different `ChannelMap`.

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1, oneshot)
// ---------------------------------------------------------------------------

/// Photoresistor divider. ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LIGHT_ADC_CHANNEL: u32 = 0;
/// Analog temperature sensor (TMP36-style, 10 mV/°C, 500 mV offset).
/// ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const TEMPERATURE_ADC_CHANNEL: u32 = 1;
/// MQ-2 gas / smoke sensor. ADC1 channel 2 (GPIO 3 on ESP32-S3).
pub const GAS_ADC_CHANNEL: u32 = 2;

// ---------------------------------------------------------------------------
// Sensors — Digital / Pulse
// ---------------------------------------------------------------------------

/// PIR motion sensor. HIGH = motion detected.
pub const MOTION_GPIO: i32 = 4;
/// HC-SR04 trigger (output).
pub const RANGING_TRIGGER_GPIO: i32 = 5;
/// HC-SR04 echo (input, through a 5 V → 3.3 V divider).
pub const RANGING_ECHO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Light relay coil. HIGH = lamp on.
pub const LIGHT_RELAY_GPIO: i32 = 7;
/// Gate motor driver enable. HIGH = gate open.
pub const GATE_MOTOR_GPIO: i32 = 15;
/// Piezo buzzer. HIGH = alarm sounding.
pub const ALARM_BUZZER_GPIO: i32 = 16;
/// Fan motor MOSFET gate, LEDC PWM.
pub const FAN_PWM_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC channel driving the fan.
pub const FAN_LEDC_CHANNEL: u32 = 0;
/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the fan motor (25 kHz — inaudible).
pub const FAN_PWM_FREQ_HZ: u32 = 25_000;

// ---------------------------------------------------------------------------
// Displays (I²C character LCDs behind PCF8574 backpacks)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;
/// Primary display (light / temperature / fan pages).
pub const PRIMARY_LCD_ADDR: u8 = 0x27;
/// Secondary display (gate / gas page).
pub const SECONDARY_LCD_ADDR: u8 = 0x26;
/// Character columns per display row.
pub const LCD_COLUMNS: usize = 16;
/// Rows per display.
pub const LCD_ROWS: usize = 2;
