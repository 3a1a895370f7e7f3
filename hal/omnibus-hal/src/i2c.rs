//! I2C bus abstractions
//!
//! Provides the blocking master-side transaction primitive every
//! Omnibus device driver is built on. The board has a single bus and
//! a single logical caller; transactions never overlap.

/// I2C bus master
///
/// One call is one addressed transaction on the shared bus. There is
/// no implicit retry: a failed transaction is reported once and the
/// caller must abort the in-progress device handshake.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// Devices with a register-pointer protocol expect a command-only
    /// `write` first; the following `read` then returns that
    /// register's value.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// Transaction failure taxonomy for bus implementations
///
/// Implementations with richer error types can use their own
/// associated error; this enum covers what the board-level drivers
/// need to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// Address or data byte not acknowledged
    Nack,
    /// Lost bus arbitration to another master
    ArbitrationLost,
    /// Transaction did not complete in time
    Timeout,
}
