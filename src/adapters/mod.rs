//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                 |
//! |------------|--------------------|-----------------------------|
//! | `hardware` | ActuatorPort       | ESP32 LEDC PWM, GPIO        |
//! |            | LightSensorPort    | ESP32 ADC1 (LDR)            |
//! | `ticker`   | TickerPort         | esp_timer → event queue     |
//! | `log_sink` | EventSink          | Serial log output           |
//! | `wifi`     | (none)             | ESP-IDF WiFi STA            |
//! | `http`     | (none)             | ESP-IDF HTTP server → router|

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod ticker;
pub mod wifi;
