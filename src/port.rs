//! The platform USB stack surface consumed by the function driver.

use crate::endpoint::{EndpointAddress, EndpointType};
use crate::Result;

/// A trait for the platform-specific USB device stack. Implement this to
/// connect the CDC function driver to a hardware peripheral or an emulated
/// bus.
///
/// All methods are called synchronously from the same event-dispatch
/// context that delivers [`DeviceEvent`](crate::event::DeviceEvent)s, so
/// implementations never need interior mutability or locking. None of the
/// methods may block; a primitive that cannot complete reports
/// [`EndpointFailed`](crate::CdcError::EndpointFailed) and the host-side
/// transfer times out.
pub trait UsbPort {
    /// Opens an endpoint with the given address, transfer type and maximum
    /// packet size. Called again without an intervening close when the host
    /// re-initializes the class; the result of that case is
    /// platform-defined and is not retried.
    fn open_endpoint(
        &mut self,
        addr: EndpointAddress,
        ep_type: EndpointType,
        max_packet_size: u16,
    ) -> Result<()>;

    /// Closes a previously opened endpoint.
    fn close_endpoint(&mut self, addr: EndpointAddress) -> Result<()>;

    /// Writes a single packet on a non-control endpoint.
    ///
    /// # Errors
    ///
    /// * [`EndpointFailed`](crate::CdcError::EndpointFailed) - The endpoint
    ///   is not open or the peripheral rejected the packet.
    fn write(&mut self, addr: EndpointAddress, buf: &[u8]) -> Result<()>;

    /// Transmits the data stage of a device-to-host control transfer on
    /// endpoint 0. The buffer must stay untouched by the driver until the
    /// platform reports the transfer complete, which the single-buffered
    /// command state guarantees.
    fn control_write(&mut self, buf: &[u8]) -> Result<()>;

    /// Arms endpoint 0 to receive a host-to-device data stage of exactly
    /// `len` bytes. Completion is signalled by a
    /// [`ControlRxReady`](crate::event::DeviceEvent::ControlRxReady) event.
    fn control_prepare_read(&mut self, len: u16) -> Result<()>;

    /// Copies the completed data stage out of the platform's receive
    /// buffer and returns the number of bytes received.
    ///
    /// # Errors
    ///
    /// * [`BufferOverflow`](crate::CdcError::BufferOverflow) - The received
    ///   data does not fit in `buf`. This indicates the host sent more data
    ///   than armed for, which the platform should already have rejected.
    fn control_read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Signals a request error on endpoint 0 by stalling the next stage of
    /// the transfer. Used to reject malformed or oversized requests.
    fn control_stall(&mut self);
}
