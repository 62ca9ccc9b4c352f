//! Serial transport boundary.

/// Byte-stream transport the engine speaks over (UART, USB-CDC, a socket,
/// an in-memory pipe in tests).
///
/// The engine reads at most one byte per poll cycle and writes whole frames.
pub trait SerialTransport {
    /// Read the next available byte, or `None` if nothing is pending.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write bytes to the transport.
    fn write(&mut self, bytes: &[u8]);
}
