//! TM1650 4-digit 7-segment display
//!
//! The TM1650 decodes register selection from the bus address itself:
//! the display-control register answers at one address and each digit
//! register at a consecutive address from the digit base. Characters
//! render through a fixed ASCII-to-segment font table; anything the
//! table does not map comes out blank.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// Display-control register address (7-bit)
const CTRL_ADDR: u8 = 0x24;

/// Address of digit 0; digit `i` answers at `DIGIT_BASE_ADDR + i`
const DIGIT_BASE_ADDR: u8 = 0x34;

/// Number of digits on the display
const DIGITS: u8 = 4;

/// Display-control value: display on, minimum brightness
const DISPLAY_ON: u8 = 0x01;

/// Settle time after every register write
const SETTLE_MS: u32 = 2;

/// ASCII code point to 7-segment bit pattern
///
/// Unmapped code points are 0x00 (blank).
const DIGIT_FONT: [u8; 128] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x82, 0x21, 0x00, 0x00, 0x00, 0x00, 0x02, 0x39, 0x0F, 0x00, 0x00, 0x00,
    0x40, 0x80, 0x00, 0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x00, 0x00,
    0x00, 0x48, 0x00, 0x53, 0x00, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, 0x6F, 0x76, 0x06, 0x1E,
    0x00, 0x38, 0x00, 0x54, 0x3F, 0x73, 0x67, 0x50, 0x6D, 0x78, 0x3E, 0x00, 0x00, 0x00, 0x6E,
    0x00, 0x39, 0x00, 0x0F, 0x00, 0x08, 0x63, 0x5F, 0x7C, 0x58, 0x5E, 0x7B, 0x71, 0x6F, 0x74,
    0x02, 0x1E, 0x00, 0x06, 0x00, 0x54, 0x5C, 0x73, 0x67, 0x50, 0x6D, 0x78, 0x1C, 0x00, 0x00,
    0x00, 0x6E, 0x00, 0x39, 0x30, 0x0F, 0x00, 0x00,
];

/// TM1650 4-digit display driver
pub struct Tm1650<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Tm1650<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Turn the display on
    ///
    /// Idempotent; safe to call again at any time.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(CTRL_ADDR, DISPLAY_ON)
    }

    /// Render up to four characters
    ///
    /// All digits are blanked first, then the first four characters
    /// of `text` render left to right; extra characters are ignored
    /// and unmapped characters stay blank.
    pub fn print(&mut self, text: &str) -> Result<(), Error<I2C::Error>> {
        self.clear()?;
        for (i, byte) in text.bytes().take(usize::from(DIGITS)).enumerate() {
            self.write_register(DIGIT_BASE_ADDR + i as u8, font(byte))?;
        }
        Ok(())
    }

    /// Blank all digits
    pub fn clear(&mut self) -> Result<(), Error<I2C::Error>> {
        for i in 0..DIGITS {
            self.write_register(DIGIT_BASE_ADDR + i, 0x00)?;
        }
        Ok(())
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(address, &[value]).map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }
}

/// Segment pattern for an ASCII byte; non-ASCII renders blank
fn font(byte: u8) -> u8 {
    DIGIT_FONT.get(usize::from(byte)).copied().unwrap_or(0x00)
}
