//! Display drivers
//!
//! - [`lcd1602`]: 16x2/20x4 character LCD behind an I2C bridge
//! - [`tm1650`]: TM1650 4-digit 7-segment display
//! - [`ht16k33`]: HT16K33 8x8 LED matrix

pub mod ht16k33;
pub mod lcd1602;
pub mod tm1650;

pub use ht16k33::Matrix8x8;
pub use lcd1602::Lcd1602;
pub use tm1650::Tm1650;
