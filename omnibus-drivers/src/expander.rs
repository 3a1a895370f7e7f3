//! PCA9554 8-bit GPIO expander
//!
//! Three registers matter: input (0), output (1) and configuration
//! (3). Mode and output changes are read-modify-write of a single
//! register: point at it, read the current byte, flip one bit, write
//! it back. Pointing at the wrong register between the read and the
//! write is not detectable on the wire, so each operation touches
//! exactly one register.

use omnibus_hal::I2cBus;

use crate::Error;

/// PCA9554 I2C address (7-bit)
const PCA9554_ADDR: u8 = 0x20;

/// Input port register
const REG_INPUT: u8 = 0x00;

/// Output port register
const REG_OUTPUT: u8 = 0x01;

/// Pin configuration register (1 = input, 0 = output)
const REG_CONFIG: u8 = 0x03;

/// Number of pins on the expander
const PINS: u8 = 8;

/// Direction of one expander pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Output,
    Input,
}

/// PCA9554 driver
///
/// All state lives in the expander's registers; the driver is
/// stateless between calls.
pub struct Pca9554<I2C> {
    i2c: I2C,
}

impl<I2C> Pca9554<I2C>
where
    I2C: I2cBus,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Configure one pin as input or output
    pub fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Error<I2C::Error>> {
        self.update_register(REG_CONFIG, pin, mode == PinMode::Input)
    }

    /// Drive one output pin high or low
    pub fn write_pin(&mut self, pin: u8, high: bool) -> Result<(), Error<I2C::Error>> {
        self.update_register(REG_OUTPUT, pin, high)
    }

    /// Read the level of one input pin
    pub fn read_pin(&mut self, pin: u8) -> Result<bool, Error<I2C::Error>> {
        if pin >= PINS {
            return Err(Error::OutOfRange);
        }
        let state = self.read_register(REG_INPUT)?;
        Ok((state >> pin) & 0x01 != 0)
    }

    fn update_register(&mut self, register: u8, pin: u8, set: bool) -> Result<(), Error<I2C::Error>> {
        if pin >= PINS {
            return Err(Error::OutOfRange);
        }
        let current = self.read_register(register)?;
        let updated = if set {
            current | (1 << pin)
        } else {
            current & !(1 << pin)
        };
        self.i2c
            .write(PCA9554_ADDR, &[register, updated])
            .map_err(Error::Bus)
    }

    /// Pointer-then-read: select the register, then read its byte
    fn read_register(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        self.i2c
            .write(PCA9554_ADDR, &[register])
            .map_err(Error::Bus)?;
        let mut data = [0u8; 1];
        self.i2c.read(PCA9554_ADDR, &mut data).map_err(Error::Bus)?;
        Ok(data[0])
    }
}
