//! Device events and command event dispatch.

use crate::class::CdcClass;
use crate::control::Request;
use crate::{CdcError, Result};

/// Events delivered by the platform event source to
/// [`CdcFunction::handle_event`](crate::CdcFunction::handle_event).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceEvent {
    /// The host has configured the device and the class is starting up.
    ClassInit,

    /// The class is shutting down, usually because the device was reset or
    /// unconfigured.
    ClassDeinit,

    /// A SETUP packet arrived on endpoint 0. All setup requests are
    /// delivered; the driver acts only on class requests.
    ClassSetup(Request),

    /// The data stage armed by a host-to-device class request has
    /// completed and can be read from the port.
    ControlRxReady,
}

/// A class control command delivered to subscribers.
///
/// Transient: the event borrows the command buffer and is discarded after
/// dispatch. `data` is empty for requests without a data stage.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CdcControlEvent<'a> {
    /// The class-specific request code, for example
    /// [`SET_LINE_CODING`](crate::control::cdc_request::SET_LINE_CODING).
    pub request: u8,

    /// The command payload.
    pub data: &'a [u8],
}

/// The subscriber list handed to the driver for each dispatch. Delivery is
/// synchronous and in slice order, which is the registration order chosen
/// by the composition layer. Subscribers cannot be added or removed during
/// a dispatch because the list is exclusively borrowed for its duration.
pub type ClassList<'a> = [&'a mut dyn CdcClass];

/// Delivers a command event to every subscriber in order.
pub(crate) fn dispatch_command(classes: &mut ClassList<'_>, event: &CdcControlEvent<'_>) {
    for cls in classes.iter_mut() {
        cls.command(event);
    }
}

/// Offers a device-to-host command to each subscriber in order and returns
/// the response length of the first one that accepts.
///
/// The accepting subscriber has filled `buf` synchronously before this
/// returns, so the caller may hand the buffer straight to the control
/// endpoint.
pub(crate) fn dispatch_command_in(
    classes: &mut ClassList<'_>,
    request: u8,
    buf: &mut [u8],
) -> Result<usize> {
    for cls in classes.iter_mut() {
        match cls.command_in(request, buf) {
            Err(CdcError::Unsupported) => continue,
            result => return result,
        }
    }

    Err(CdcError::Unsupported)
}
