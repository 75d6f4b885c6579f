use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use std::fmt;
use strum::{Display, IntoStaticStr};

const OCF_MASK: u16 = 0x03FF;
const OGF_SHIFT: u16 = 10;

// Opcode group fields.
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
pub enum OpcodeGroup {
    LinkControl = 0x01,
    LinkPolicy = 0x02,
    HostController = 0x03,
    InformationalParameters = 0x04,
    StatusParameters = 0x05,
    LowEnergy = 0x08,
    Testing = 0x3E,
    Vendor = 0x3F,
}

impl OpcodeGroup {
    pub fn from_ogf(ogf: u16) -> Option<Self> {
        Self::from_u16(ogf)
    }

    pub fn ogf(&self) -> u16 {
        *self as u16
    }
}

// LE controller command fields used for advertising.
pub mod le {
    pub const SET_ADVERTISING_PARAMETERS: u16 = 0x0006;
    pub const READ_ADVERTISING_CHANNEL_TX_POWER: u16 = 0x0007;
    pub const SET_ADVERTISING_DATA: u16 = 0x0008;
    pub const SET_SCAN_RESPONSE_DATA: u16 = 0x0009;
    pub const SET_ADVERTISE_ENABLE: u16 = 0x000A;
}

// A packed HCI command opcode: 6-bit group field over a 10-bit command field.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const fn new(ogf: u16, ocf: u16) -> Self {
        Self((ocf & OCF_MASK) | (ogf << OGF_SHIFT))
    }

    pub const fn with_group(group: OpcodeGroup, ocf: u16) -> Self {
        Self::new(group as u16, ocf)
    }

    pub const fn ogf(&self) -> u16 {
        self.0 >> OGF_SHIFT
    }

    pub const fn ocf(&self) -> u16 {
        self.0 & OCF_MASK
    }

    pub fn group(&self) -> Option<OpcodeGroup> {
        OpcodeGroup::from_ogf(self.ogf())
    }

    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Opcode> for u16 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:04X} (ogf 0x{:02X}, ocf 0x{:04X})", self.0, self.ogf(), self.ocf())
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::{le, Opcode, OpcodeGroup};

    #[test]
    fn pack_le_set_advertising_data() {
        let opcode = Opcode::with_group(OpcodeGroup::LowEnergy, le::SET_ADVERTISING_DATA);
        assert_eq!(opcode.value(), 0x2008);
        assert_eq!(opcode.ogf(), 0x08);
        assert_eq!(opcode.ocf(), 0x0008);
        assert_eq!(opcode.group(), Some(OpcodeGroup::LowEnergy));
    }

    #[test]
    fn ocf_is_masked_to_ten_bits() {
        let opcode = Opcode::new(0x01, 0x0401);
        assert_eq!(opcode.ocf(), 0x0001);
        assert_eq!(opcode.ogf(), 0x01);
    }

    #[test]
    fn unknown_group() {
        assert_eq!(Opcode::new(0x20, 0x01).group(), None);
        assert_eq!(Opcode::from(0x0C03).group(), Some(OpcodeGroup::HostController));
    }
}
