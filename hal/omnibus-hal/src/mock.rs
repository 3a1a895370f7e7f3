//! Scripted doubles for host-side driver tests
//!
//! Every driver test runs against these instead of real hardware:
//! writes are recorded in issue order, reads pop pre-scripted
//! responses, delays are logged instead of blocking, and a fault can
//! be injected at any transaction index to verify that a driver
//! aborts its handshake instead of continuing.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::i2c::{BusFault, I2cBus};
use crate::uart::{UartRx, UartTx};

/// Largest single transfer the doubles record
pub const MAX_XFER: usize = 24;

/// One recorded bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Write {
        address: u8,
        bytes: Vec<u8, MAX_XFER>,
    },
    Read {
        address: u8,
        len: usize,
    },
}

/// Scripted I2C bus double
#[derive(Debug, Default)]
pub struct MockBus {
    /// Every transaction the driver issued, in order
    pub ops: Vec<BusOp, 64>,
    responses: Vec<Vec<u8, MAX_XFER>, 16>,
    next_response: usize,
    fail_at: Option<usize>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response returned by the next unscripted read
    ///
    /// Responses are consumed in FIFO order.
    pub fn push_read(&mut self, bytes: &[u8]) {
        let mut v = Vec::new();
        v.extend_from_slice(bytes).expect("response exceeds MAX_XFER");
        self.responses.push(v).expect("too many scripted responses");
    }

    /// Fail the `index`-th transaction (0-based, writes and reads
    /// both counted) with [`BusFault::Nack`]
    pub fn fail_transaction(&mut self, index: usize) {
        self.fail_at = Some(index);
    }

    /// Writes only, in issue order
    pub fn writes(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.ops.iter().filter_map(|op| match op {
            BusOp::Write { address, bytes } => Some((*address, bytes.as_slice())),
            BusOp::Read { .. } => None,
        })
    }

    /// Number of read transactions issued so far
    pub fn read_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Read { .. }))
            .count()
    }
}

impl I2cBus for MockBus {
    type Error = BusFault;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusFault> {
        let index = self.ops.len();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(data).expect("write exceeds MAX_XFER");
        self.ops
            .push(BusOp::Write { address, bytes })
            .expect("transaction log full");
        if self.fail_at == Some(index) {
            return Err(BusFault::Nack);
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusFault> {
        let index = self.ops.len();
        self.ops
            .push(BusOp::Read {
                address,
                len: buf.len(),
            })
            .expect("transaction log full");
        if self.fail_at == Some(index) {
            return Err(BusFault::Nack);
        }
        let response = self
            .responses
            .get(self.next_response)
            .expect("no scripted response for read");
        self.next_response += 1;
        buf.copy_from_slice(&response[..buf.len()]);
        Ok(())
    }
}

/// Scripted serial line double
///
/// Each transmitted message is recorded as a separate entry so tests
/// can assert on message boundaries, not just the byte stream.
#[derive(Debug, Default)]
pub struct MockSerial {
    /// Transmitted messages, in issue order
    pub writes: Vec<Vec<u8, MAX_XFER>, 16>,
    rx: Vec<u8, 32>,
    rx_pos: usize,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes to be returned by subsequent reads
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend_from_slice(bytes).expect("rx buffer full");
    }
}

impl UartTx for MockSerial {
    type Error = BusFault;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), BusFault> {
        let mut message = Vec::new();
        message
            .extend_from_slice(data)
            .expect("message exceeds MAX_XFER");
        self.writes.push(message).expect("write log full");
        Ok(())
    }
}

impl UartRx for MockSerial {
    type Error = BusFault;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, BusFault> {
        let available = &self.rx[self.rx_pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.rx_pos += n;
        Ok(n)
    }
}

/// Records requested delays instead of blocking
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Requested delays in nanoseconds, in call order
    pub delays_ns: Vec<u64, 64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested delays converted to whole milliseconds
    pub fn delays_ms(&self) -> impl Iterator<Item = u32> + '_ {
        self.delays_ns.iter().map(|ns| (ns / 1_000_000) as u32)
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns as u64).expect("delay log full");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_pop_in_fifo_order() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x11]);
        bus.push_read(&[0x22, 0x33]);

        let mut one = [0u8; 1];
        let mut two = [0u8; 2];
        bus.read(0x40, &mut one).unwrap();
        bus.read(0x40, &mut two).unwrap();

        assert_eq!(one, [0x11]);
        assert_eq!(two, [0x22, 0x33]);
    }

    #[test]
    fn test_fault_injection_by_index() {
        let mut bus = MockBus::new();
        bus.fail_transaction(1);

        assert!(bus.write(0x20, &[0x00]).is_ok());
        assert_eq!(bus.write(0x20, &[0x01]), Err(BusFault::Nack));
        // The failed transaction is still logged
        assert_eq!(bus.ops.len(), 2);
    }

    #[test]
    fn test_serial_records_message_boundaries() {
        let mut serial = MockSerial::new();
        serial.write_blocking(&[0x90, 60, 0x7F]).unwrap();
        serial.write_blocking(&[0x80, 60, 0x00]).unwrap();

        assert_eq!(serial.writes.len(), 2);
        assert_eq!(serial.writes[0].as_slice(), &[0x90, 60, 0x7F]);
    }

    #[test]
    fn test_serial_read_returns_available() {
        let mut serial = MockSerial::new();
        serial.push_rx(&[1, 2, 3]);

        let mut buf = [0u8; 8];
        let n = serial.read_blocking(&mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(serial.read_blocking(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_delay_log_in_milliseconds() {
        let mut delay = MockDelay::new();
        delay.delay_ms(2);
        delay.delay_ms(85);

        let ms: std::vec::Vec<u32> = delay.delays_ms().collect();
        assert_eq!(ms, [2, 85]);
    }
}
