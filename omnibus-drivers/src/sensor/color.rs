//! Ambient color sensor
//!
//! Three-phase handshake: trigger a conversion, poll the status
//! register, then read and scale the result. A status other than
//! READY means the conversion is still running; that is a valid
//! "no reading yet" outcome, not an error.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// Color sensor I2C address (7-bit)
const COLOR_ADDR: u8 = 0x0A;

/// Start a conversion
const CMD_MEASURE: u8 = 0x01;

/// Select the status register
const CMD_STATUS: u8 = 0x02;

/// Select the result registers
const CMD_RESULT: u8 = 0x03;

/// Status value once a conversion has completed
const STATUS_READY: u8 = 0x03;

/// Conversion time after triggering
const MEASURE_MS: u32 = 80;

/// Settle time after the status/result register selects
const SELECT_MS: u32 = 5;

/// One decoded color reading, channels scaled to 8 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorReading {
    pub channels: [u8; 3],
}

/// Color sensor driver
pub struct ColorSensor<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> ColorSensor<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Run one conversion and read the color back
    ///
    /// Returns `Ok(None)` when the sensor reports the conversion is
    /// not yet complete. When the peak channel exceeds 255 all three
    /// channels are scaled by `255/peak` (integer truncation) so the
    /// result always fits 8 bits.
    pub fn read(&mut self) -> Result<Option<ColorReading>, Error<I2C::Error>> {
        self.i2c
            .write(COLOR_ADDR, &[CMD_MEASURE])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(MEASURE_MS);

        self.i2c
            .write(COLOR_ADDR, &[CMD_STATUS])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SELECT_MS);
        let mut status = [0u8; 1];
        self.i2c.read(COLOR_ADDR, &mut status).map_err(Error::Bus)?;
        if status[0] != STATUS_READY {
            return Ok(None);
        }

        self.i2c
            .write(COLOR_ADDR, &[CMD_RESULT])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SELECT_MS);
        let mut data = [0u8; 6];
        self.i2c.read(COLOR_ADDR, &mut data).map_err(Error::Bus)?;

        Ok(Some(decode(&data)))
    }
}

/// Decode the 6 result bytes into scaled 8-bit channels
///
/// The channel-to-byte-pair mapping is not sequential; it matches the
/// sensor's observed register layout and must not be "corrected".
fn decode(data: &[u8; 6]) -> ColorReading {
    let raw: [u16; 3] = [
        u16::from_le_bytes([data[4], data[5]]),
        u16::from_le_bytes([data[0], data[1]]),
        u16::from_le_bytes([data[2], data[3]]),
    ];

    let peak = raw[0].max(raw[1]).max(raw[2]);
    let mut channels = [0u8; 3];
    for (out, &ch) in channels.iter_mut().zip(raw.iter()) {
        *out = if peak > 255 {
            (u32::from(ch) * 255 / u32::from(peak)) as u8
        } else {
            ch as u8
        };
    }
    ColorReading { channels }
}
