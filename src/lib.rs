#![no_std]

//! USB Communications Device Class (CDC) function driver core.
//!
//! This crate implements the class-generic part of a USB CDC function: it
//! owns the interrupt IN notification endpoint and its lifecycle, classifies
//! class-specific control transfers arriving on endpoint 0, and dispatches
//! them as command events to concrete CDC implementations such as virtual
//! serial ports or network adapters.
//!
//! The platform USB stack is consumed through the [`UsbPort`](port::UsbPort)
//! trait and is expected to feed [`DeviceEvent`](event::DeviceEvent)s into
//! [`CdcFunction::handle_event`](CdcFunction::handle_event) from its
//! event-dispatch context. All processing is synchronous and runs to
//! completion inside that callback; see [`CdcClass`](class::CdcClass) for
//! the timing contract this imposes on subscribers.

#[macro_use]
mod macros;

mod buffer;
mod function;

pub mod class;
pub mod control;
pub mod descriptor;
pub mod dummy_port;
pub mod endpoint;
pub mod event;
pub mod port;

pub use crate::buffer::MAX_COMMAND_PACKET_SIZE;
pub use crate::function::{CdcFunction, Parameters, COMMAND_EP_ADDRESS};

/// Direction of USB traffic, named from the perspective of the host as in
/// the USB standard. The enum values match the direction bit of endpoint
/// addresses and request type bytes.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbDirection {
    /// Host to device (OUT)
    Out = 0x00,
    /// Device to host (IN)
    In = 0x80,
}

/// Errors returned by the CDC function driver and the platform port.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CdcError {
    /// A SETUP packet with an invalid length was received.
    InvalidSetupPacket,
    /// The host declared a command data stage larger than the command
    /// buffer. The request is rejected; the buffer is never overflowed.
    OversizedCommand,
    /// A buffer was too small for the data to be written into it.
    BufferOverflow,
    /// The operation is not valid in the current state, for example sending
    /// a notification while the command endpoint is closed.
    InvalidState,
    /// A platform endpoint primitive failed.
    EndpointFailed,
    /// The subscriber does not handle this request.
    Unsupported,
}

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, CdcError>;

pub mod prelude {
    //! Convenience re-exports for device implementations.

    pub use crate::event::DeviceEvent;
    pub use crate::function::{CdcFunction, Parameters};
    pub use crate::port::UsbPort;
    pub use crate::{CdcError, Result, UsbDirection};
}

pub mod class_prelude {
    //! Convenience re-exports for CDC subclass implementations.

    pub use crate::class::{CdcClass, DeviceFeature};
    pub use crate::control::{self, Request};
    pub use crate::descriptor::DescriptorWriter;
    pub use crate::event::{CdcControlEvent, ClassList};
    pub use crate::{CdcError, Result, UsbDirection};
}
