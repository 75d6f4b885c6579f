use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use strum::{Display, IntoStaticStr};

// HCI packet indicators, as carried in the first byte of a raw HCI frame.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum PacketType {
    Command = 0x01,
    Acl = 0x02,
    Sco = 0x03,
    Event = 0x04,
    // Vendor packets share filter bit 0 with packet type 0.
    Vendor = 0xFF,
}

impl PacketType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_u8(byte)
    }

    pub fn to_byte(&self) -> u8 {
        *self as u8
    }
}

impl From<PacketType> for u8 {
    fn from(t: PacketType) -> Self {
        t.to_byte()
    }
}
