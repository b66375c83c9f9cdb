//! SETUP packet model for control transfers.

use core::convert::TryFrom;

use num_enum::TryFromPrimitive;

use crate::{CdcError, Result, UsbDirection};

/// Control request type.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestType {
    /// Request defined by the USB standard, handled by the device layer.
    Standard = 0,
    /// Request defined by a device class. Only these are routed by the CDC
    /// function driver; everything else is left to other layers.
    Class = 1,
    /// Vendor-specific request.
    Vendor = 2,
    /// Reserved.
    Reserved = 3,
}

/// Control request recipient.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Recipient {
    /// Request is intended for the entire device.
    Device = 0,
    /// Request is intended for an interface; `index` holds the interface
    /// number.
    Interface = 1,
    /// Request is intended for an endpoint; `index` holds the endpoint
    /// address.
    Endpoint = 2,
    /// None of the above.
    Other = 3,
    /// Reserved.
    Reserved = 4,
}

/// A control request read from a SETUP packet.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    /// Direction of the data stage.
    pub direction: UsbDirection,
    /// Type of the request.
    pub request_type: RequestType,
    /// Recipient of the request.
    pub recipient: Recipient,
    /// Request code. The meaning of the value depends on `request_type`.
    pub request: u8,
    /// Request value.
    pub value: u16,
    /// Request index.
    pub index: u16,
    /// Length of the data stage. For host-to-device transfers this is the
    /// exact length of the data the host will send, for device-to-host
    /// transfers the maximum length the device should return.
    pub length: u16,
}

impl Request {
    /// Parses the eight bytes of a SETUP packet.
    pub fn parse(buf: &[u8]) -> Result<Request> {
        if buf.len() != 8 {
            return Err(CdcError::InvalidSetupPacket);
        }

        let rt = buf[0];
        let recipient = rt & 0b11111;

        Ok(Request {
            direction: if (rt & 0x80) != 0 {
                UsbDirection::In
            } else {
                UsbDirection::Out
            },
            request_type: RequestType::try_from((rt >> 5) & 0b11)
                .map_err(|_| CdcError::InvalidSetupPacket)?,
            recipient: Recipient::try_from(recipient).unwrap_or(Recipient::Reserved),
            request: buf[1],
            value: u16::from_le_bytes([buf[2], buf[3]]),
            index: u16::from_le_bytes([buf[4], buf[5]]),
            length: u16::from_le_bytes([buf[6], buf[7]]),
        })
    }
}

/// Class-specific request codes defined by CDC 1.10 section 6.2.
///
/// The function driver does not interpret these; they are listed for
/// subclasses matching on [`CdcControlEvent::request`](crate::event::CdcControlEvent).
pub mod cdc_request {
    pub const SEND_ENCAPSULATED_COMMAND: u8 = 0x00;
    pub const GET_ENCAPSULATED_RESPONSE: u8 = 0x01;
    pub const SET_COMM_FEATURE: u8 = 0x02;
    pub const GET_COMM_FEATURE: u8 = 0x03;
    pub const CLEAR_COMM_FEATURE: u8 = 0x04;
    pub const SET_LINE_CODING: u8 = 0x20;
    pub const GET_LINE_CODING: u8 = 0x21;
    pub const SET_CONTROL_LINE_STATE: u8 = 0x22;
    pub const SEND_BREAK: u8 = 0x23;
}

/// Notification codes sent on the command endpoint, per CDC 1.10 section
/// 6.3. Used with [`CdcFunction::notify`](crate::CdcFunction::notify).
pub mod cdc_notification {
    pub const NETWORK_CONNECTION: u8 = 0x00;
    pub const RESPONSE_AVAILABLE: u8 = 0x01;
    pub const SERIAL_STATE: u8 = 0x20;
}
