//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements         | Connects to                 |
//! |--------------|--------------------|-----------------------------|
//! | `hardware`   | SensorPort         | ESP32 ADC, GPIO             |
//! |              | ActuatorPort       | ESP32 LEDC PWM, GPIO        |
//! | `log_sink`   | EventSink          | Serial log output           |
//! |              | ReportLog          | Serial log, `report` target |
//! | `text_grid`  | DisplayPort        | Two 16×2 character displays |
//! | `time`       | MonotonicClock     | ESP32 high-resolution timer |
//! |              | DelayNs            | FreeRTOS / ROM delays       |

pub mod hardware;
pub mod log_sink;
pub mod text_grid;
pub mod time;
