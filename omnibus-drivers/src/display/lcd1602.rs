//! Character LCD behind an I2C command bridge
//!
//! The bridge multiplexes two streams onto one register write: byte 0
//! selects command (`0x01`) or character data (`0x02`) mode, byte 1
//! carries the value. Every write needs a 2 ms settle before the
//! controller accepts the next one.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// LCD bridge I2C address (7-bit)
const LCD1602_ADDR: u8 = 0x18;

/// Mode prefix for control writes
const CTRL_COMMAND: u8 = 0x01;

/// Mode prefix for character data writes
const CTRL_DATA: u8 = 0x02;

/// DDRAM base address of each display row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x10, 0x50];

/// Settle time after every bridge write
const SETTLE_MS: u32 = 2;

/// Character LCD driver
///
/// Stateless between calls; the cursor position lives in the
/// controller, not here.
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Initialize the display: on, cleared, left-to-right entry
    ///
    /// Idempotent; safe to call again at any time.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(0x0C)?; // display on, cursor off
        self.command(0x01)?; // clear
        self.command(0x06) // entry mode: increment, no shift
    }

    /// Send a raw controller command byte
    pub fn command(&mut self, cmd: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(LCD1602_ADDR, &[CTRL_COMMAND, cmd])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// Move the cursor to `(col, row)`
    ///
    /// Rows above 3 do not exist on any supported panel and are
    /// rejected rather than silently aliased.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<I2C::Error>> {
        let offset = *ROW_OFFSETS.get(usize::from(row)).ok_or(Error::OutOfRange)?;
        self.command(0x80 | col.wrapping_add(offset))
    }

    /// Write text at the current cursor position
    ///
    /// Each character is its own data transaction with its own settle
    /// time, as the bridge requires.
    pub fn print(&mut self, text: &str) -> Result<(), Error<I2C::Error>> {
        for byte in text.bytes() {
            self.i2c
                .write(LCD1602_ADDR, &[CTRL_DATA, byte])
                .map_err(Error::Bus)?;
            self.delay.delay_ms(SETTLE_MS);
        }
        Ok(())
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(0x01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnibus_hal::mock::{MockBus, MockDelay};

    fn lcd() -> Lcd1602<MockBus, MockDelay> {
        Lcd1602::new(MockBus::new(), MockDelay::new())
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = lcd();
        lcd.init().unwrap();

        let writes: Vec<_> = lcd.i2c.writes().collect();
        assert_eq!(
            writes,
            [
                (LCD1602_ADDR, &[0x01, 0x0C][..]),
                (LCD1602_ADDR, &[0x01, 0x01][..]),
                (LCD1602_ADDR, &[0x01, 0x06][..]),
            ]
        );
        let delays: Vec<_> = lcd.delay.delays_ms().collect();
        assert_eq!(delays, [2, 2, 2]);
    }

    #[test]
    fn test_cursor_address_encoding() {
        let mut lcd = lcd();
        lcd.set_cursor(3, 2).unwrap();

        // 0x80 | (3 + 0x10)
        let writes: Vec<_> = lcd.i2c.writes().collect();
        assert_eq!(writes, [(LCD1602_ADDR, &[0x01, 0x93][..])]);
    }

    #[test]
    fn test_cursor_row_bounds() {
        let mut lcd = lcd();
        assert_eq!(lcd.set_cursor(0, 4), Err(Error::OutOfRange));
        assert!(lcd.i2c.ops.is_empty());
    }

    #[test]
    fn test_print_one_transaction_per_character() {
        let mut lcd = lcd();
        lcd.print("Hi").unwrap();

        let writes: Vec<_> = lcd.i2c.writes().collect();
        assert_eq!(
            writes,
            [
                (LCD1602_ADDR, &[0x02, b'H'][..]),
                (LCD1602_ADDR, &[0x02, b'i'][..]),
            ]
        );
    }

    #[test]
    fn test_print_stops_on_bus_failure() {
        let mut lcd = lcd();
        lcd.i2c.fail_transaction(0);

        assert!(matches!(lcd.print("Hi"), Err(Error::Bus(_))));
        // The second character was never attempted
        assert_eq!(lcd.i2c.ops.len(), 1);
    }
}
