//! Hardware abstraction traits for the Omnibus expansion board
//!
//! The board exposes every peripheral over one shared I2C bus and one
//! serial line. This crate defines the blocking bus transaction
//! primitives the device drivers are written against, so the same
//! driver code runs on target hardware and against scripted doubles
//! on the host.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;
pub mod uart;

#[cfg(feature = "mock")]
pub mod mock;

pub use i2c::{BusFault, I2cBus};
pub use uart::{UartRx, UartTx};
