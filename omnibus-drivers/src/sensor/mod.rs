//! Sensor drivers
//!
//! - [`ultrasonic`]: trigger-and-read distance ranger
//! - [`color`]: multi-phase ambient color sensor
//! - [`sht20`]: humidity/temperature IC
//! - [`bh1750`]: ambient light sensor
//! - [`ntc`]: NTC thermistor on an ADC pin (no bus)

pub mod bh1750;
pub mod color;
pub mod ntc;
pub mod sht20;
pub mod ultrasonic;

pub use bh1750::Bh1750;
pub use color::ColorSensor;
pub use ntc::{AdcReader, NtcSensor, SensorError};
pub use sht20::Sht20;
pub use ultrasonic::Ultrasonic;
