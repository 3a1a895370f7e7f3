//! Motion control
//!
//! Everything that moves on the board runs through the PCA9685
//! 16-channel PWM controller: DC motor headers, servo headers and
//! stepper coil pairs are fixed channel assignments on top of the
//! per-channel duty primitive.

pub mod pca9685;

pub use pca9685::{Direction, Pca9685};
