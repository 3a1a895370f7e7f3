//! I2C ultrasonic ranger
//!
//! Write the trigger register, give the module 2 ms to latch a
//! measurement, then read the 16-bit distance back little-endian.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// Ranger I2C address (7-bit)
const ULTRASONIC_ADDR: u8 = 0x0B;

/// Trigger/measurement register
const CMD_TRIGGER: u8 = 0x01;

/// Settle time between trigger and read-back
const SETTLE_MS: u32 = 2;

/// Ultrasonic ranger driver
pub struct Ultrasonic<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Ultrasonic<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Trigger a measurement and read the distance
    ///
    /// Returns the module's raw 16-bit reading. The driver performs
    /// no range validation; callers must bound-check for their
    /// application.
    pub fn read_distance(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.i2c
            .write(ULTRASONIC_ADDR, &[CMD_TRIGGER])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);

        let mut data = [0u8; 2];
        self.i2c
            .read(ULTRASONIC_ADDR, &mut data)
            .map_err(Error::Bus)?;
        Ok(u16::from_le_bytes(data))
    }
}
