//! The command scratch buffer.

use crate::{CdcError, Result};

/// Capacity of the command buffer, which is also the maximum packet size of
/// the command notification endpoint.
pub const MAX_COMMAND_PACKET_SIZE: usize = 16;

/// Fixed-capacity buffer shared between the header and data phases of a
/// command transfer. It stages outgoing data for device-to-host requests
/// and receives incoming data for host-to-device requests.
///
/// Single buffered: at most one command transfer is in flight at a time,
/// and a new header phase overwrites whatever the previous transfer left
/// behind.
pub struct CommandBuffer {
    buf: [u8; MAX_COMMAND_PACKET_SIZE],
}

impl CommandBuffer {
    pub(crate) fn new() -> Self {
        CommandBuffer {
            buf: [0; MAX_COMMAND_PACKET_SIZE],
        }
    }

    /// Gets the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Gets the first `len` bytes of the buffer.
    ///
    /// # Errors
    ///
    /// * [`OversizedCommand`](CdcError::OversizedCommand) - `len` exceeds
    ///   the capacity. Lengths taken from a `wLength` field must fail here
    ///   instead of overflowing.
    pub fn get(&self, len: usize) -> Result<&[u8]> {
        self.buf.get(..len).ok_or(CdcError::OversizedCommand)
    }

    /// Mutable version of [`get`](CommandBuffer::get).
    pub fn get_mut(&mut self, len: usize) -> Result<&mut [u8]> {
        self.buf.get_mut(..len).ok_or(CdcError::OversizedCommand)
    }
}
