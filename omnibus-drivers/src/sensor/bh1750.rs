//! BH1750 ambient light sensor
//!
//! Continuous high-resolution mode: one command write, a 120 ms
//! integration period, then a 2-byte big-endian read.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// BH1750 I2C address (7-bit)
const BH1750_ADDR: u8 = 0x23;

/// Continuously measure at 1 lx resolution
const CMD_CONT_HIGH_RES: u8 = 0x10;

/// Integration time before the first reading is valid
const INTEGRATION_MS: u32 = 120;

/// Bus quiet time after the read
const QUIET_MS: u32 = 10;

/// BH1750 driver
pub struct Bh1750<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Bh1750<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Measure the ambient light level
    ///
    /// Returns the sensor's raw counts; lux is approximately
    /// `counts / 1.2`.
    pub fn read_level(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.i2c
            .write(BH1750_ADDR, &[CMD_CONT_HIGH_RES])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(INTEGRATION_MS);

        let mut data = [0u8; 2];
        self.i2c.read(BH1750_ADDR, &mut data).map_err(Error::Bus)?;
        self.delay.delay_ms(QUIET_MS);
        Ok(u16::from_be_bytes(data))
    }
}
