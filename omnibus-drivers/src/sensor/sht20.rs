//! SHT20 humidity/temperature sensor
//!
//! Each measurement is a command write, a fixed conversion wait, then
//! a 2-byte big-endian read. Conversion takes 85 ms for temperature
//! and 40 ms for humidity; the bus gets a short quiet time after each
//! read before the next transaction.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// SHT20 I2C address (7-bit)
const SHT20_ADDR: u8 = 0x40;

/// Trigger temperature measurement (hold master)
const CMD_MEASURE_TEMP: u8 = 0xE3;

/// Trigger humidity measurement (hold master)
const CMD_MEASURE_HUMIDITY: u8 = 0xE5;

/// Temperature conversion time
const TEMP_CONVERSION_MS: u32 = 85;

/// Humidity conversion time
const HUMIDITY_CONVERSION_MS: u32 = 40;

/// Bus quiet time after each read
const QUIET_MS: u32 = 2;

/// SHT20 driver
pub struct Sht20<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Sht20<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Read the temperature in 0.1 degC units (e.g. 235 = 23.5 degC)
    pub fn read_temperature_x10(&mut self) -> Result<i16, Error<I2C::Error>> {
        let raw = self.measure(CMD_MEASURE_TEMP, TEMP_CONVERSION_MS)?;
        let celsius = -46.86 + 175.72 * f32::from(raw) / 65535.0;
        Ok((celsius * 10.0) as i16)
    }

    /// Read the relative humidity in whole percent
    pub fn read_humidity(&mut self) -> Result<i16, Error<I2C::Error>> {
        let raw = self.measure(CMD_MEASURE_HUMIDITY, HUMIDITY_CONVERSION_MS)?;
        let percent = -6.0 + 125.0 * f32::from(raw) / 65535.0;
        Ok(percent as i16)
    }

    fn measure(&mut self, command: u8, conversion_ms: u32) -> Result<u16, Error<I2C::Error>> {
        self.i2c.write(SHT20_ADDR, &[command]).map_err(Error::Bus)?;
        self.delay.delay_ms(conversion_ms);

        let mut data = [0u8; 2];
        self.i2c.read(SHT20_ADDR, &mut data).map_err(Error::Bus)?;
        self.delay.delay_ms(QUIET_MS);
        Ok(u16::from_be_bytes(data))
    }
}
