//! Endpoint addressing and descriptor information.

use crate::UsbDirection;

/// USB endpoint descriptor information. Populated once when the function is
/// initialized and immutable until the next initialization.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointDescriptor {
    /// Endpoint address.
    pub address: EndpointAddress,

    /// Endpoint transfer type.
    pub ep_type: EndpointType,

    /// Maximum packet size.
    pub max_packet_size: u16,

    /// Poll interval for interrupt endpoints, in frames.
    pub interval: u8,
}

/// USB endpoint address combining a direction and a number.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointAddress(u8);

impl From<u8> for EndpointAddress {
    #[inline]
    fn from(addr: u8) -> EndpointAddress {
        EndpointAddress(addr)
    }
}

impl From<EndpointAddress> for u8 {
    #[inline]
    fn from(addr: EndpointAddress) -> u8 {
        addr.0
    }
}

impl EndpointAddress {
    const INBITS: u8 = UsbDirection::In as u8;

    /// Constructs an EndpointAddress from an endpoint number and direction.
    #[inline]
    pub const fn from_parts(number: u8, dir: UsbDirection) -> Self {
        EndpointAddress(number | dir as u8)
    }

    /// Gets the direction part of the address.
    #[inline]
    pub fn direction(&self) -> UsbDirection {
        if (self.0 & Self::INBITS) != 0 {
            UsbDirection::In
        } else {
            UsbDirection::Out
        }
    }

    /// Gets the number part of the address.
    #[inline]
    pub fn number(&self) -> u8 {
        self.0 & !Self::INBITS
    }
}

/// USB endpoint transfer type. The enum values can be cast to `u8` to get
/// the transfer type bits of `bmAttributes`.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndpointType {
    /// Control endpoint. Only used for endpoint 0.
    Control = 0b00,

    /// Isochronous endpoint, for time-critical unreliable data.
    Isochronous = 0b01,

    /// Bulk endpoint, for large amounts of best-effort reliable data.
    Bulk = 0b10,

    /// Interrupt endpoint, for small amounts of time-critical reliable
    /// data. The command notification endpoint is one of these.
    Interrupt = 0b11,
}
