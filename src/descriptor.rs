//! Configuration descriptor fragments.

use crate::endpoint::EndpointDescriptor;
use crate::{CdcError, Result};

/// Standard descriptor types, as in USB 2.0 table 9-5.
pub mod descriptor_type {
    pub const DEVICE: u8 = 1;
    pub const CONFIGURATION: u8 = 2;
    pub const STRING: u8 = 3;
    pub const INTERFACE: u8 = 4;
    pub const ENDPOINT: u8 = 5;

    /// Class-specific interface descriptor (CS_INTERFACE).
    pub const CS_INTERFACE: u8 = 0x24;
}

/// Functional descriptor subtypes defined by CDC 1.10 table 25.
pub mod functional_subtype {
    pub const HEADER: u8 = 0x00;
    pub const CALL_MANAGEMENT: u8 = 0x01;
    pub const ABSTRACT_CONTROL_MANAGEMENT: u8 = 0x02;
    pub const UNION: u8 = 0x06;
}

/// USB class code for communications devices.
pub const USB_CLASS_CDC: u8 = 0x02;

/// Writes descriptors into a configuration descriptor buffer provided by
/// the composition layer.
pub struct DescriptorWriter<'a> {
    buf: &'a mut [u8],
    position: usize,
}

impl<'a> DescriptorWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        DescriptorWriter { buf, position: 0 }
    }

    /// Gets the current position in the buffer, i.e. the number of bytes
    /// written so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Writes an arbitrary (usually class-specific) descriptor. The length
    /// and type header is prepended automatically.
    pub fn write(&mut self, descriptor_type: u8, descriptor: &[u8]) -> Result<()> {
        let length = descriptor.len();

        if self.position + 2 + length > self.buf.len() {
            return Err(CdcError::BufferOverflow);
        }

        self.buf[self.position] = (length + 2) as u8;
        self.buf[self.position + 1] = descriptor_type;
        self.buf[self.position + 2..self.position + 2 + length].copy_from_slice(descriptor);
        self.position += 2 + length;

        Ok(())
    }

    /// Writes an endpoint descriptor.
    pub fn endpoint(&mut self, endpoint: &EndpointDescriptor) -> Result<()> {
        let mps = endpoint.max_packet_size;

        self.write(
            descriptor_type::ENDPOINT,
            &[
                endpoint.address.into(),   // bEndpointAddress
                endpoint.ep_type as u8,    // bmAttributes
                mps as u8,                 // wMaxPacketSize
                (mps >> 8) as u8,
                endpoint.interval,         // bInterval
            ],
        )
    }

    /// Writes a CDC functional descriptor (CS_INTERFACE) with the given
    /// subtype. `data` holds the subtype-specific fields, for example the
    /// controlling and subordinate interface numbers of a UNION descriptor.
    pub fn class_function(&mut self, subtype: u8, data: &[u8]) -> Result<()> {
        if self.position + 3 + data.len() > self.buf.len() {
            return Err(CdcError::BufferOverflow);
        }

        self.buf[self.position] = (data.len() + 3) as u8;
        self.buf[self.position + 1] = descriptor_type::CS_INTERFACE;
        self.buf[self.position + 2] = subtype;
        self.buf[self.position + 3..self.position + 3 + data.len()].copy_from_slice(data);
        self.position += 3 + data.len();

        Ok(())
    }
}
