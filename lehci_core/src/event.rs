use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use strum::{Display, IntoStaticStr};

// General (uncategorized) HCI event codes.
//
// Ref: Bluetooth Core Specification, Vol 4, Part E, 7.7
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
pub enum EventCode {
    InquiryComplete = 0x01,
    InquiryResult = 0x02,
    ConnectionComplete = 0x03,
    RemoteNameRequestComplete = 0x07,
    CommandComplete = 0x0E,
    CommandStatus = 0x0F,
    NumberOfCompletedPackets = 0x13,
    MaxSlotsChange = 0x1B,
    LowEnergyMeta = 0x3E,
}

impl EventCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_u8(byte)
    }

    pub fn to_byte(&self) -> u8 {
        *self as u8
    }
}

impl From<EventCode> for u8 {
    fn from(e: EventCode) -> Self {
        e.to_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::EventCode;

    #[test]
    fn event_code_bytes() {
        assert_eq!(EventCode::from_byte(0x0E), Some(EventCode::CommandComplete));
        assert_eq!(EventCode::from_byte(0x3E), Some(EventCode::LowEnergyMeta));
        assert_eq!(EventCode::from_byte(0x3F), None);
        assert_eq!(u8::from(EventCode::MaxSlotsChange), 0x1B);
    }
}
