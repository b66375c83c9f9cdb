//! The CDC function driver.

use crate::buffer::{CommandBuffer, MAX_COMMAND_PACKET_SIZE};
use crate::class::DeviceFeature;
use crate::control::{Request, RequestType};
use crate::descriptor::DescriptorWriter;
use crate::endpoint::{EndpointAddress, EndpointDescriptor, EndpointType};
use crate::event::{self, CdcControlEvent, ClassList, DeviceEvent};
use crate::port::UsbPort;
use crate::{CdcError, Result, UsbDirection};

/// Address of the command notification endpoint.
pub const COMMAND_EP_ADDRESS: EndpointAddress = EndpointAddress::from_parts(1, UsbDirection::In);

const DEFAULT_POLL_INTERVAL: u8 = 16;

// bmRequestType of a class notification: device to host, class, interface.
const NOTIFICATION_REQUEST_TYPE: u8 = 0xa1;

/// Initialization parameters for the CDC function.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameters {
    /// Polling interval of the command notification endpoint, in frames.
    pub command_poll_interval: u8,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            command_poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum EndpointState {
    Closed,
    Open,
}

/// Owns the command endpoint descriptor and its open/close lifecycle.
struct CommandEndpoint {
    descriptor: EndpointDescriptor,
    state: EndpointState,
}

impl CommandEndpoint {
    fn new() -> Self {
        CommandEndpoint {
            descriptor: EndpointDescriptor {
                address: COMMAND_EP_ADDRESS,
                ep_type: EndpointType::Interrupt,
                max_packet_size: MAX_COMMAND_PACKET_SIZE as u16,
                interval: DEFAULT_POLL_INTERVAL,
            },
            state: EndpointState::Closed,
        }
    }

    /// Rewrites the descriptor in full. Everything except the polling
    /// interval is fixed by the class.
    fn configure(&mut self, interval: u8) {
        self.descriptor = EndpointDescriptor {
            address: COMMAND_EP_ADDRESS,
            ep_type: EndpointType::Interrupt,
            max_packet_size: MAX_COMMAND_PACKET_SIZE as u16,
            interval,
        };
    }

    fn is_open(&self) -> bool {
        self.state == EndpointState::Open
    }

    /// Opens the endpoint. A duplicate open re-issues the platform call;
    /// its result is platform-defined and is not retried.
    fn open<P: UsbPort>(&mut self, port: &mut P) {
        port.open_endpoint(
            self.descriptor.address,
            self.descriptor.ep_type,
            self.descriptor.max_packet_size,
        )
        .ok();

        self.state = EndpointState::Open;
    }

    fn close<P: UsbPort>(&mut self, port: &mut P) {
        port.close_endpoint(self.descriptor.address).ok();
        self.state = EndpointState::Closed;
    }
}

/// A host-to-device command between its header and data phases.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct PendingCommand {
    op_code: u8,
    length: u16,
}

/// The CDC function driver.
///
/// One instance exists per device. The composition layer assembles it with
/// the control endpoint and any subclass features, routes
/// [`DeviceEvent`]s from the platform into [`handle_event`](CdcFunction::handle_event),
/// and embeds [`config_descriptor`](CdcFunction::config_descriptor) into the
/// device configuration descriptor.
pub struct CdcFunction {
    command_ep: CommandEndpoint,
    command: CommandBuffer,
    pending: Option<PendingCommand>,
}

impl CdcFunction {
    /// Creates a function driver with default parameters and a closed
    /// command endpoint.
    pub fn new() -> Self {
        CdcFunction {
            command_ep: CommandEndpoint::new(),
            command: CommandBuffer::new(),
            pending: None,
        }
    }

    /// Initializes the function.
    ///
    /// The supplied device features are initialized first, in slice order,
    /// and the first failure aborts initialization before the command
    /// endpoint descriptor is touched. On success the descriptor is
    /// rewritten in full from `params`, so initializing again with the same
    /// parameters is harmless.
    pub fn init(
        &mut self,
        params: &Parameters,
        features: &mut [&mut dyn DeviceFeature],
    ) -> Result<()> {
        for feature in features.iter_mut() {
            feature.init()?;
        }

        self.command_ep.configure(params.command_poll_interval);
        Ok(())
    }

    /// Gets the command endpoint descriptor.
    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.command_ep.descriptor
    }

    /// Gets whether the command endpoint is currently open.
    pub fn is_open(&self) -> bool {
        self.command_ep.is_open()
    }

    /// Writes the command endpoint descriptor for embedding into the
    /// device configuration descriptor.
    pub fn config_descriptor(&self, writer: &mut DescriptorWriter<'_>) -> Result<()> {
        writer.endpoint(&self.command_ep.descriptor)
    }

    /// Handles a device event, dispatching command events to `classes` in
    /// slice order where the event calls for it.
    ///
    /// Must be called from the platform's event-dispatch context; all
    /// processing completes before this returns.
    pub fn handle_event<P: UsbPort>(
        &mut self,
        port: &mut P,
        classes: &mut ClassList<'_>,
        event: &DeviceEvent,
    ) -> Result<()> {
        match event {
            DeviceEvent::ClassInit => {
                cdc_debug!("opening command endpoint");
                self.command_ep.open(port);
                Ok(())
            }

            DeviceEvent::ClassDeinit => {
                cdc_debug!("closing command endpoint");
                self.command_ep.close(port);
                Ok(())
            }

            DeviceEvent::ClassSetup(req) => self.handle_setup(port, classes, req),

            DeviceEvent::ControlRxReady => match self.data_out_complete(port, classes) {
                // completion of a transfer that belongs to another layer
                Err(CdcError::InvalidState) => Ok(()),
                result => result,
            },
        }
    }

    /// Classifies a class setup request and executes its action: dispatch a
    /// command event, gather and transmit a response, or arm the data stage
    /// receive. Non-class requests are ignored so other layers can handle
    /// them.
    fn handle_setup<P: UsbPort>(
        &mut self,
        port: &mut P,
        classes: &mut ClassList<'_>,
        req: &Request,
    ) -> Result<()> {
        if req.request_type != RequestType::Class {
            return Ok(());
        }

        cdc_trace!("class request {:x}, length {}", req.request, req.length);

        if req.length == 0 {
            // no data stage, pure notification
            event::dispatch_command(
                classes,
                &CdcControlEvent {
                    request: req.request,
                    data: &[],
                },
            );

            return Ok(());
        }

        if req.length as usize > self.command.capacity() {
            cdc_debug!("rejecting oversized command, length {}", req.length);
            port.control_stall();
            return Err(CdcError::OversizedCommand);
        }

        if req.direction == UsbDirection::In {
            // The response must go out inline with the setup transaction,
            // so the subscriber fills the buffer before control_write.
            let buf = self.command.get_mut(req.length as usize)?;

            match event::dispatch_command_in(classes, req.request, buf) {
                Ok(count) => {
                    let count = count.min(buf.len());
                    port.control_write(&buf[..count])
                }
                Err(err) => {
                    port.control_stall();
                    Err(err)
                }
            }
        } else {
            self.pending = Some(PendingCommand {
                op_code: req.request,
                length: req.length,
            });

            port.control_prepare_read(req.length)
        }
    }

    /// Completes a host-to-device command: copies the received data stage
    /// into the command buffer and dispatches the command event recorded at
    /// the header phase.
    ///
    /// This is the completion hook for the receive armed by a class setup
    /// request, normally invoked through
    /// [`ControlRxReady`](DeviceEvent::ControlRxReady).
    ///
    /// # Errors
    ///
    /// * [`InvalidState`](CdcError::InvalidState) - No command is pending.
    pub fn data_out_complete<P: UsbPort>(
        &mut self,
        port: &mut P,
        classes: &mut ClassList<'_>,
    ) -> Result<()> {
        let pending = self.pending.take().ok_or(CdcError::InvalidState)?;

        let count = {
            let buf = self.command.get_mut(pending.length as usize)?;
            port.control_read(buf)?
        };

        event::dispatch_command(
            classes,
            &CdcControlEvent {
                request: pending.op_code,
                data: self.command.get(count.min(pending.length as usize))?,
            },
        );

        Ok(())
    }

    /// Sends a class notification message on the command endpoint: the
    /// 8 byte notification header followed by `data`, as one interrupt
    /// packet. `code` is one of
    /// [`cdc_notification`](crate::control::cdc_notification), `value` maps
    /// to wValue and `interface` to wIndex of the header.
    ///
    /// # Errors
    ///
    /// * [`InvalidState`](CdcError::InvalidState) - The command endpoint is
    ///   closed.
    /// * [`BufferOverflow`](CdcError::BufferOverflow) - Header and payload
    ///   do not fit in one command endpoint packet.
    pub fn notify<P: UsbPort>(
        &mut self,
        port: &mut P,
        code: u8,
        value: u16,
        interface: u16,
        data: &[u8],
    ) -> Result<()> {
        if !self.command_ep.is_open() {
            return Err(CdcError::InvalidState);
        }

        let mut packet: heapless::Vec<u8, MAX_COMMAND_PACKET_SIZE> = heapless::Vec::new();

        let length = data.len() as u16;
        let header = [
            NOTIFICATION_REQUEST_TYPE,
            code,
            value as u8,
            (value >> 8) as u8,
            interface as u8,
            (interface >> 8) as u8,
            length as u8,
            (length >> 8) as u8,
        ];

        packet
            .extend_from_slice(&header)
            .map_err(|_| CdcError::BufferOverflow)?;
        packet
            .extend_from_slice(data)
            .map_err(|_| CdcError::BufferOverflow)?;

        port.write(self.command_ep.descriptor.address, &packet)
    }
}

impl Default for CdcFunction {
    fn default() -> Self {
        Self::new()
    }
}
