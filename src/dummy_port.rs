#![allow(unused_variables)]

use crate::endpoint::{EndpointAddress, EndpointType};
use crate::port::UsbPort;
use crate::Result;

/// Dummy port implementation with no functionality.
///
/// Documentation examples can create an instance of this port just to make
/// them compile:
///
/// ```
/// use cdc_function::dummy_port::DummyPort;
/// use cdc_function::prelude::*;
///
/// let mut cdc = CdcFunction::new();
/// let mut port = DummyPort::new();
///
/// cdc.init(&Parameters::default(), &mut []).unwrap();
/// ```
pub struct DummyPort;

impl DummyPort {
    /// Creates a new `DummyPort`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyPort {
    fn default() -> Self {
        Self::new()
    }
}

impl UsbPort for DummyPort {
    fn open_endpoint(
        &mut self,
        addr: EndpointAddress,
        ep_type: EndpointType,
        max_packet_size: u16,
    ) -> Result<()> {
        unimplemented!()
    }

    fn close_endpoint(&mut self, addr: EndpointAddress) -> Result<()> {
        unimplemented!()
    }

    fn write(&mut self, addr: EndpointAddress, buf: &[u8]) -> Result<()> {
        unimplemented!()
    }

    fn control_write(&mut self, buf: &[u8]) -> Result<()> {
        unimplemented!()
    }

    fn control_prepare_read(&mut self, len: u16) -> Result<()> {
        unimplemented!()
    }

    fn control_read(&mut self, buf: &mut [u8]) -> Result<usize> {
        unimplemented!()
    }

    fn control_stall(&mut self) {
        unimplemented!()
    }
}
