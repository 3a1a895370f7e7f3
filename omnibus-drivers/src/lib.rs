//! Device drivers for the Omnibus expansion board
//!
//! Each peripheral on the board gets one driver module, all built on
//! the same two primitives: a blocking bus transaction
//! ([`omnibus_hal::I2cBus`] / [`omnibus_hal::UartTx`]) and a mandatory
//! settle delay after register operations
//! ([`embedded_hal::delay::DelayNs`]). Protocol steps are executed as
//! (operation, delay) pairs in the exact order and with the exact
//! durations each chip requires.
//!
//! - Displays: character LCD, 4-digit 7-segment, 8x8 LED matrix
//! - Sensors: ultrasonic ranger, color, humidity/temperature,
//!   ambient light, NTC thermistor
//! - Actuators: 16-channel PWM controller (DC motors, servos,
//!   steppers), GPIO expander
//! - Audio: MIDI synthesizer and MP3 player on the serial line
//!
//! The bus and every driver assume a single logical caller; nothing
//! here synchronizes concurrent access. A bus failure aborts the
//! in-progress handshake and propagates; no operation retries.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod audio;
pub mod display;
pub mod expander;
pub mod motion;
pub mod sensor;

mod error;

pub use error::Error;
