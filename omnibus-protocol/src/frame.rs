//! Frame encoding and decoding for the audio module command link.
//!
//! Frame format:
//! - START (1 byte): 0x7E synchronization byte
//! - PAYLOAD (6 bytes): command payload
//! - CHECKSUM (2 bytes): two's complement of the payload byte sum, big-endian
//! - END (1 byte): 0xEF terminator

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Frame terminator byte
pub const FRAME_END: u8 = 0xEF;

/// Payload size in bytes (fixed)
pub const PAYLOAD_LEN: usize = 6;

/// Complete frame size (START + PAYLOAD + CHECKSUM + END)
pub const FRAME_LEN: usize = 1 + PAYLOAD_LEN + 2 + 1;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// First byte is not [`FRAME_START`] or last is not [`FRAME_END`]
    InvalidDelimiter,
    /// Checksum does not match the payload
    InvalidChecksum,
}

/// A fixed-size command frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    payload: [u8; PAYLOAD_LEN],
}

impl Frame {
    /// Create a frame carrying the given payload
    pub fn new(payload: [u8; PAYLOAD_LEN]) -> Self {
        Self { payload }
    }

    /// The command payload
    pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
        &self.payload
    }

    /// Two's-complement checksum of the payload byte sum
    ///
    /// Adding the checksum to the payload sum yields 0 mod 2^16.
    pub fn checksum(&self) -> u16 {
        let sum = self
            .payload
            .iter()
            .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
        sum.wrapping_neg()
    }

    /// Encode this frame into its 10-byte wire form
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut wire = [0u8; FRAME_LEN];
        let checksum = self.checksum();

        wire[0] = FRAME_START;
        wire[1..1 + PAYLOAD_LEN].copy_from_slice(&self.payload);
        wire[7] = (checksum >> 8) as u8;
        wire[8] = (checksum & 0xFF) as u8;
        wire[9] = FRAME_END;
        wire
    }

    /// Decode a 10-byte wire frame, verifying delimiters and checksum
    pub fn decode(wire: &[u8; FRAME_LEN]) -> Result<Self, FrameError> {
        if wire[0] != FRAME_START || wire[9] != FRAME_END {
            return Err(FrameError::InvalidDelimiter);
        }

        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&wire[1..1 + PAYLOAD_LEN]);
        let frame = Self { payload };

        let received = (u16::from(wire[7]) << 8) | u16::from(wire[8]);
        if received != frame.checksum() {
            return Err(FrameError::InvalidChecksum);
        }

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_frame_vector() {
        // Payload sums to 0x10, so the checksum is 0xFFF0
        let frame = Frame::new([0x01, 0x06, 0x03, 0x01, 0x00, 0x05]);
        assert_eq!(frame.checksum(), 0xFFF0);
        assert_eq!(
            frame.encode(),
            [0x7E, 0x01, 0x06, 0x03, 0x01, 0x00, 0x05, 0xFF, 0xF0, 0xEF]
        );
    }

    #[test]
    fn test_zero_payload_checksum() {
        let frame = Frame::new([0; 6]);
        assert_eq!(frame.checksum(), 0);
    }

    #[test]
    fn test_decode_rejects_bad_delimiters() {
        let mut wire = Frame::new([1, 2, 3, 4, 5, 6]).encode();
        wire[0] = 0x00;
        assert_eq!(Frame::decode(&wire), Err(FrameError::InvalidDelimiter));

        let mut wire = Frame::new([1, 2, 3, 4, 5, 6]).encode();
        wire[9] = 0x00;
        assert_eq!(Frame::decode(&wire), Err(FrameError::InvalidDelimiter));
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut wire = Frame::new([1, 2, 3, 4, 5, 6]).encode();
        wire[8] ^= 0xFF;
        assert_eq!(Frame::decode(&wire), Err(FrameError::InvalidChecksum));
    }

    proptest! {
        #[test]
        fn prop_checksum_cancels_payload_sum(payload in prop::array::uniform6(any::<u8>())) {
            let frame = Frame::new(payload);
            let sum = payload
                .iter()
                .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
            prop_assert_eq!(sum.wrapping_add(frame.checksum()), 0);
        }

        #[test]
        fn prop_encode_decode_roundtrip(payload in prop::array::uniform6(any::<u8>())) {
            let frame = Frame::new(payload);
            let decoded = Frame::decode(&frame.encode()).unwrap();
            prop_assert_eq!(decoded, frame);
        }
    }
}
