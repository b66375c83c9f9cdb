//! Traits implemented by CDC subclasses and composed device features.

use crate::event::CdcControlEvent;
use crate::{CdcError, Result};

/// A CDC subclass subscribing to command events, for example a virtual
/// serial port or a network adapter.
///
/// Both methods are invoked synchronously from the USB event-dispatch
/// context, between the setup and data phases of a control transfer. They
/// must run to completion without blocking or deferring work: the bus
/// transaction continues as soon as the method returns.
pub trait CdcClass {
    /// Called when a class command arrives that carries no response
    /// obligation: a request without a data stage (`data` is empty), or a
    /// host-to-device request whose data stage has completed (`data` holds
    /// the received bytes).
    fn command(&mut self, event: &CdcControlEvent<'_>) {
        let _ = event;
    }

    /// Called for a device-to-host class request.
    ///
    /// The implementation must write the response payload into the first
    /// bytes of `buf` before returning; `buf` is exactly as long as the
    /// host requested. Returning `Ok(n)` transmits the first `n` bytes on
    /// the control endpoint immediately after this method returns.
    /// Returning [`Unsupported`](CdcError::Unsupported) passes the request
    /// to the next subscriber; any other error rejects the transfer.
    fn command_in(&mut self, request: u8, buf: &mut [u8]) -> Result<usize> {
        let _ = (request, buf);
        Err(CdcError::Unsupported)
    }
}

/// A capability module composed into the device alongside the CDC function,
/// for example a subclass-specific bulk endpoint pair.
///
/// [`CdcFunction::init`](crate::CdcFunction::init) brings features up in a
/// fixed order and the first failure aborts device initialization.
pub trait DeviceFeature {
    /// Brings the feature up. Must be safe to call again after a previous
    /// success or failure.
    fn init(&mut self) -> Result<()>;
}
