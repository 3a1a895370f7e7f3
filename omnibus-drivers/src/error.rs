//! Driver error type

/// Errors surfaced by the Omnibus device drivers
///
/// Bus failures wrap the transport's own error so callers can always
/// distinguish a failed transaction from a defaulted reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The underlying bus or serial transaction failed
    Bus(E),
    /// A caller-supplied index addressed a row, pin or channel that
    /// does not exist on the device
    OutOfRange,
    /// A caller-supplied buffer does not fit the fixed-size
    /// destination
    BufferSize,
}
