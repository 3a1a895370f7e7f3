//! HT16K33 8x8 LED matrix
//!
//! The driver owns an 8-byte row buffer, one bit per column. Pixel
//! and bitmap operations mutate only the buffer; nothing reaches the
//! device until an explicit [`Matrix8x8::show`]. The one exception is
//! [`Matrix8x8::clear`], which blanks the panel immediately.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// HT16K33 I2C address (7-bit)
const HT16K33_ADDR: u8 = 0x70;

/// System setup command: oscillator on
const SYSTEM_SETUP_ON: u8 = 0x21;

/// Display setup command base
const BLINK_CMD: u8 = 0x80;

/// Display setup flag: display on, blink off
const BLINK_DISPLAY_ON: u8 = 0x01;

/// Brightness command base; low nibble is the dimming level
const CMD_BRIGHTNESS: u8 = 0xE0;

/// Rows (and columns) on the panel
const ROWS: usize = 8;

/// Settle time after every device write
const SETTLE_MS: u32 = 2;

/// 8x8 LED matrix driver with an owned row buffer
pub struct Matrix8x8<I2C, D> {
    i2c: I2C,
    delay: D,
    buffer: [u8; ROWS],
}

impl<I2C, D> Matrix8x8<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            buffer: [0; ROWS],
        }
    }

    /// Power up the controller and blank the panel
    ///
    /// Idempotent; safe to call again at any time.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(SYSTEM_SETUP_ON)?;
        self.command(BLINK_CMD | BLINK_DISPLAY_ON)?;
        self.command(CMD_BRIGHTNESS | 0x0F)?;
        self.clear()
    }

    /// Set the pixel at `(x, y)` in the row buffer
    ///
    /// No device I/O happens until [`show`](Self::show).
    pub fn draw_pixel(&mut self, x: u8, y: u8) -> Result<(), Error<I2C::Error>> {
        if usize::from(x) >= ROWS || usize::from(y) >= ROWS {
            return Err(Error::OutOfRange);
        }
        self.buffer[usize::from(y)] |= 1 << x;
        Ok(())
    }

    /// Copy a caller-supplied bitmap over the row buffer
    ///
    /// `bitmap` holds one byte per row, top to bottom, and must not
    /// exceed the 8-row buffer. No device I/O happens until
    /// [`show`](Self::show).
    pub fn draw_bitmap(&mut self, bitmap: &[u8]) -> Result<(), Error<I2C::Error>> {
        if bitmap.len() > ROWS {
            return Err(Error::BufferSize);
        }
        self.buffer[..bitmap.len()].copy_from_slice(bitmap);
        Ok(())
    }

    /// Zero the row buffer and blank the panel immediately
    pub fn clear(&mut self) -> Result<(), Error<I2C::Error>> {
        self.buffer = [0; ROWS];
        self.flush()
    }

    /// Flush the current row buffer to the panel
    pub fn show(&mut self) -> Result<(), Error<I2C::Error>> {
        self.flush()
    }

    /// The in-memory row buffer, one byte per row
    pub fn buffer(&self) -> &[u8; ROWS] {
        &self.buffer
    }

    fn command(&mut self, cmd: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(HT16K33_ADDR, &[cmd]).map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// One 17-byte burst: display RAM address 0, then each row byte
    /// followed by a padding byte for the unused column bank.
    fn flush(&mut self) -> Result<(), Error<I2C::Error>> {
        let mut data = [0u8; 1 + 2 * ROWS];
        for (i, &row) in self.buffer.iter().enumerate() {
            data[i * 2 + 1] = row;
        }
        self.i2c.write(HT16K33_ADDR, &data).map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }
}
