use std::cell::RefCell;
use std::rc::Rc;

use cdc_function::class_prelude::*;
use cdc_function::control::{Recipient, RequestType};
use cdc_function::endpoint::{EndpointAddress, EndpointType};
use cdc_function::event::DeviceEvent;
use cdc_function::port::UsbPort;

/// One platform primitive invocation recorded by [`MockPort`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortOp {
    Open {
        addr: u8,
        ep_type: EndpointType,
        max_packet_size: u16,
    },
    Close {
        addr: u8,
    },
    Write {
        addr: u8,
        data: Vec<u8>,
    },
    ControlWrite {
        data: Vec<u8>,
    },
    ControlPrepareRead {
        len: u16,
    },
    ControlRead {
        len: usize,
    },
    ControlStall,
}

/// A port that records every primitive call and plays back a scripted data
/// stage from `rx_data` when the driver reads a completed control receive.
#[derive(Default)]
pub struct MockPort {
    pub ops: Vec<PortOp>,
    pub rx_data: Vec<u8>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rx_data(data: &[u8]) -> Self {
        MockPort {
            ops: Vec::new(),
            rx_data: data.to_vec(),
        }
    }
}

impl UsbPort for MockPort {
    fn open_endpoint(
        &mut self,
        addr: EndpointAddress,
        ep_type: EndpointType,
        max_packet_size: u16,
    ) -> Result<()> {
        self.ops.push(PortOp::Open {
            addr: addr.into(),
            ep_type,
            max_packet_size,
        });
        Ok(())
    }

    fn close_endpoint(&mut self, addr: EndpointAddress) -> Result<()> {
        self.ops.push(PortOp::Close { addr: addr.into() });
        Ok(())
    }

    fn write(&mut self, addr: EndpointAddress, buf: &[u8]) -> Result<()> {
        self.ops.push(PortOp::Write {
            addr: addr.into(),
            data: buf.to_vec(),
        });
        Ok(())
    }

    fn control_write(&mut self, buf: &[u8]) -> Result<()> {
        self.ops.push(PortOp::ControlWrite { data: buf.to_vec() });
        Ok(())
    }

    fn control_prepare_read(&mut self, len: u16) -> Result<()> {
        self.ops.push(PortOp::ControlPrepareRead { len });
        Ok(())
    }

    fn control_read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.rx_data.len() > buf.len() {
            return Err(CdcError::BufferOverflow);
        }

        buf[..self.rx_data.len()].copy_from_slice(&self.rx_data);
        self.ops.push(PortOp::ControlRead {
            len: self.rx_data.len(),
        });
        Ok(self.rx_data.len())
    }

    fn control_stall(&mut self) {
        self.ops.push(PortOp::ControlStall);
    }
}

pub type OrderLog = Rc<RefCell<Vec<&'static str>>>;

/// A subscriber that records every command event it sees and answers
/// device-to-host requests with a canned payload, when it has one.
#[derive(Default)]
pub struct RecordingClass {
    pub commands: Vec<(u8, Vec<u8>)>,
    pub in_requests: Vec<(u8, usize)>,
    pub response: Option<Vec<u8>>,
    order: Option<(&'static str, OrderLog)>,
}

impl RecordingClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(data: &[u8]) -> Self {
        RecordingClass {
            response: Some(data.to_vec()),
            ..Self::default()
        }
    }

    /// A subscriber that also logs its name into `log` on every command
    /// event, for delivery order assertions.
    pub fn ordered(name: &'static str, log: &OrderLog) -> Self {
        RecordingClass {
            order: Some((name, log.clone())),
            ..Self::default()
        }
    }
}

impl CdcClass for RecordingClass {
    fn command(&mut self, event: &CdcControlEvent<'_>) {
        if let Some((name, log)) = &self.order {
            log.borrow_mut().push(name);
        }

        self.commands.push((event.request, event.data.to_vec()));
    }

    fn command_in(&mut self, request: u8, buf: &mut [u8]) -> Result<usize> {
        self.in_requests.push((request, buf.len()));

        match &self.response {
            Some(data) => {
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
            None => Err(CdcError::Unsupported),
        }
    }
}

pub fn setup(
    direction: UsbDirection,
    request_type: RequestType,
    request: u8,
    length: u16,
) -> DeviceEvent {
    DeviceEvent::ClassSetup(Request {
        direction,
        request_type,
        recipient: Recipient::Interface,
        request,
        value: 0,
        index: 0,
        length,
    })
}

pub fn class_out(request: u8, length: u16) -> DeviceEvent {
    setup(UsbDirection::Out, RequestType::Class, request, length)
}

pub fn class_in(request: u8, length: u16) -> DeviceEvent {
    setup(UsbDirection::In, RequestType::Class, request, length)
}
