use macaddr::MacAddr6;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::Deref,
    str::FromStr,
};
use strum::{Display as StrumDisplay, IntoStaticStr};
use thiserror::Error;

// Bluetooth device address.
//
// Held in display order (most significant byte first); the HCI wire format
// carries it reversed, see `to_wire`.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address(pub [u8; 6]);

impl Address {
    pub const fn new(addr: [u8; 6]) -> Self {
        Self(addr)
    }

    // Corresponds to `00:00:00:00:00:00`.
    pub const fn any() -> Self {
        Self([0; 6])
    }

    // Little-endian byte order used inside HCI command parameters.
    pub fn to_wire(&self) -> [u8; 6] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }
}

impl Deref for Address {
    type Target = [u8; 6];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl From<[u8; 6]> for Address {
    fn from(addr: [u8; 6]) -> Self {
        Self(addr)
    }
}

impl From<MacAddr6> for Address {
    fn from(addr: MacAddr6) -> Self {
        Self(addr.into_array())
    }
}

impl From<Address> for MacAddr6 {
    fn from(addr: Address) -> Self {
        addr.0.into()
    }
}

#[derive(Clone, Error, Debug, Eq, PartialEq)]
#[error("invalid Bluetooth address: {0}")]
pub struct InvalidAddressError(pub String);

impl FromStr for Address {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(':')
            .map(|s| u8::from_str_radix(s, 16).map_err(|_| InvalidAddressError(s.to_string())))
            .collect::<Result<Vec<_>, InvalidAddressError>>()?;
        Ok(Self(
            fields
                .try_into()
                .map_err(|_| InvalidAddressError(s.to_string()))?,
        ))
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    StrumDisplay,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    IntoStaticStr,
    FromPrimitive,
    ToPrimitive,
)]
pub enum AddressType {
    #[default]
    Public = 0x00,
    Random = 0x01,
}

impl AddressType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_u8(byte)
    }

    pub fn to_byte(&self) -> u8 {
        *self as u8
    }
}
