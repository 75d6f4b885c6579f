use crate::addr::{Address, AddressType};
use crate::advertising::AdvertisingData;
use crate::byte_order::htobs;
use crate::opcode::{le, Opcode, OpcodeGroup};
use crate::packet::PacketType;
use bytes::{BufMut, Bytes, BytesMut};
use num_derive::{FromPrimitive, ToPrimitive};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

// Packet indicator, opcode and parameter length.
pub const COMMAND_HEADER_SIZE: usize = 4;
pub const COMMAND_PARAMETER_MAX_LEN: usize = 255;

#[derive(Clone, Error, Debug, Eq, PartialEq)]
pub enum CommandError {
    #[error("command parameters are too long: {0} bytes")]
    ParameterTooLong(usize),
}

pub trait CommandParameter {
    const OPCODE: Opcode;

    fn encode(&self, buf: &mut BytesMut);
}

/// A framed HCI command packet, ready to be written to a raw HCI socket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandPacket {
    opcode: Opcode,
    buf: Bytes,
}

impl CommandPacket {
    pub fn new<P: CommandParameter>(parameter: &P) -> Result<Self, CommandError> {
        let mut params = BytesMut::new();
        parameter.encode(&mut params);
        Self::with_raw(P::OPCODE, &params)
    }

    pub fn with_raw(opcode: Opcode, params: &[u8]) -> Result<Self, CommandError> {
        if params.len() > COMMAND_PARAMETER_MAX_LEN {
            return Err(CommandError::ParameterTooLong(params.len()));
        }
        let mut buf = BytesMut::with_capacity(COMMAND_HEADER_SIZE + params.len());
        buf.put_u8(PacketType::Command.to_byte());
        buf.put_u16_le(opcode.value());
        buf.put_u8(params.len() as u8);
        buf.put_slice(params);
        tracing::trace!(%opcode, plen = params.len(), "framed command packet");
        Ok(Self {
            opcode,
            buf: buf.freeze(),
        })
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn parameters(&self) -> &[u8] {
        &self.buf[COMMAND_HEADER_SIZE..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    IntoStaticStr,
    FromPrimitive,
    ToPrimitive,
)]
pub enum AdvertisingType {
    // Connectable undirected
    #[default]
    Undirected = 0x00,
    // Connectable high duty cycle directed
    DirectedHighDuty = 0x01,
    // Scannable undirected
    Scannable = 0x02,
    // Non connectable undirected
    NonConnectable = 0x03,
    // Connectable low duty cycle directed
    DirectedLowDuty = 0x04,
}

// Advertise on channels 37, 38 and 39.
pub const CHANNEL_MAP_ALL: u8 = 0x07;

// LE Set Advertising Parameters
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SetAdvertisingParameters {
    // Both intervals are in 0.625 ms units.
    pub interval_min: u16,
    pub interval_max: u16,
    pub advertising_type: AdvertisingType,
    pub own_address_type: AddressType,
    pub direct_address_type: AddressType,
    pub direct_address: Address,
    pub channel_map: u8,
    pub filter_policy: u8,
}

impl Default for SetAdvertisingParameters {
    fn default() -> Self {
        Self {
            interval_min: 0x0800,
            interval_max: 0x0800,
            advertising_type: AdvertisingType::default(),
            own_address_type: AddressType::default(),
            direct_address_type: AddressType::default(),
            direct_address: Address::any(),
            channel_map: CHANNEL_MAP_ALL,
            filter_policy: 0x00,
        }
    }
}

impl CommandParameter for SetAdvertisingParameters {
    const OPCODE: Opcode = Opcode::with_group(OpcodeGroup::LowEnergy, le::SET_ADVERTISING_PARAMETERS);

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&htobs(self.interval_min).to_ne_bytes());
        buf.put_slice(&htobs(self.interval_max).to_ne_bytes());
        buf.put_u8(self.advertising_type as u8);
        buf.put_u8(self.own_address_type.to_byte());
        buf.put_u8(self.direct_address_type.to_byte());
        buf.put_slice(&self.direct_address.to_wire());
        buf.put_u8(self.channel_map);
        buf.put_u8(self.filter_policy);
    }
}

// LE Set Advertising Data
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SetAdvertisingData(pub AdvertisingData);

impl CommandParameter for SetAdvertisingData {
    const OPCODE: Opcode = Opcode::with_group(OpcodeGroup::LowEnergy, le::SET_ADVERTISING_DATA);

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.0.to_bytes());
    }
}

// LE Set Advertise Enable
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SetAdvertiseEnable {
    pub enabled: bool,
}

impl CommandParameter for SetAdvertiseEnable {
    const OPCODE: Opcode = Opcode::with_group(OpcodeGroup::LowEnergy, le::SET_ADVERTISE_ENABLE);

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.enabled as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advertising::{ad_type, AdvertisingDataBuilder};

    #[test]
    fn frames_header_and_parameters() {
        let packet = CommandPacket::with_raw(Opcode::new(0x03, 0x0003), &[]).unwrap();
        assert_eq!(packet.as_bytes(), &[0x01, 0x03, 0x0C, 0x00]);
        assert!(packet.parameters().is_empty());
        assert_eq!(packet.opcode().group(), Some(OpcodeGroup::HostController));
    }

    #[test]
    fn rejects_oversized_parameters() {
        let params = vec![0u8; 256];
        assert_eq!(
            CommandPacket::with_raw(Opcode::new(0x3F, 0x0001), &params),
            Err(CommandError::ParameterTooLong(256))
        );
        assert!(CommandPacket::with_raw(Opcode::new(0x3F, 0x0001), &params[..255]).is_ok());
    }

    #[test]
    fn advertising_parameters_layout() {
        let parameters = SetAdvertisingParameters {
            interval_min: 0x0020,
            interval_max: 0x0030,
            advertising_type: AdvertisingType::NonConnectable,
            own_address_type: AddressType::Random,
            direct_address_type: AddressType::Public,
            direct_address: Address::new([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]),
            ..Default::default()
        };
        let packet = CommandPacket::new(&parameters).unwrap();
        assert_eq!(packet.opcode().value(), 0x2006);
        assert_eq!(
            packet.parameters(),
            &[
                0x20, 0x00, 0x30, 0x00, 0x03, 0x01, 0x00, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x07,
                0x00,
            ]
        );
    }

    #[test]
    fn advertising_data_is_sent_whole() {
        let mut builder = AdvertisingDataBuilder::new();
        builder.push_segment(ad_type::FLAGS, &[0x06]).unwrap();
        let packet = CommandPacket::new(&SetAdvertisingData(builder.build())).unwrap();
        assert_eq!(packet.as_bytes().len(), COMMAND_HEADER_SIZE + 32);
        assert_eq!(&packet.as_bytes()[..8], &[0x01, 0x08, 0x20, 0x20, 0x03, 0x02, 0x01, 0x06]);
        assert!(packet.parameters()[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn advertise_enable() {
        let on = CommandPacket::new(&SetAdvertiseEnable { enabled: true }).unwrap();
        let off = CommandPacket::new(&SetAdvertiseEnable::default()).unwrap();
        assert_eq!(on.as_bytes(), &[0x01, 0x0A, 0x20, 0x01, 0x01]);
        assert_eq!(off.parameters(), &[0x00]);
    }
}
