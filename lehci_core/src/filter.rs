use crate::bitfield::BitField;
use crate::byte_order::htobs;
use crate::event::EventCode;
use crate::opcode::Opcode;
use crate::packet::PacketType;
use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

// Highest addressable index of each filter field.
pub const FLT_TYPE_BITS: u8 = 31;
pub const FLT_EVENT_BITS: u8 = 63;
pub const FLT_OGF_BITS: u8 = 63;
pub const FLT_OCF_BITS: u8 = 127;

// Size of the packed record: type mask, two event mask words, opcode.
pub const FILTER_SIZE: usize = 14;

#[derive(Clone, Error, Debug, Eq, PartialEq)]
pub enum FilterError {
    #[error("packed filter must be {FILTER_SIZE} bytes long, got {0}")]
    InvalidLength(usize),
}

/// Packet filter for a raw HCI socket.
///
/// Selects which packet types and event codes are delivered to the socket,
/// and optionally a single command opcode. Packet type and event indices are
/// masked to their field width, so out-of-range values alias into range
/// instead of failing. The vendor packet indicator (`0xFF`) maps onto bit 0.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Filter {
    pub type_mask: u32,
    pub event_mask: [u32; 2],
    pub opcode: u16,
}

#[inline]
fn packet_type_bit(t: u8) -> usize {
    if t == PacketType::Vendor.to_byte() {
        0
    } else {
        (t & FLT_TYPE_BITS) as usize
    }
}

#[inline]
fn event_bit(e: u8) -> usize {
    (e & FLT_EVENT_BITS) as usize
}

impl Filter {
    pub const fn new() -> Self {
        Self {
            type_mask: 0,
            event_mask: [0; 2],
            opcode: 0,
        }
    }

    /// Filter used while waiting for the reply to a single command.
    ///
    /// Accepts event packets only: command status, command complete, LE meta
    /// and `event`, with the opcode pinned to `opcode`.
    pub fn for_command_request(opcode: Opcode, event: impl Into<u8>) -> Self {
        let mut filter = Self::new();
        filter.set_packet_type(PacketType::Event);
        filter.set_event(EventCode::CommandStatus);
        filter.set_event(EventCode::CommandComplete);
        filter.set_event(EventCode::LowEnergyMeta);
        filter.set_event(event);
        filter.set_opcode(htobs(opcode.value()));
        tracing::trace!(%opcode, ?filter, "built command request filter");
        filter
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn set_packet_type(&mut self, t: impl Into<u8>) {
        std::slice::from_mut(&mut self.type_mask).set_bit(packet_type_bit(t.into()));
    }

    pub fn clear_packet_type(&mut self, t: impl Into<u8>) {
        std::slice::from_mut(&mut self.type_mask).clear_bit(packet_type_bit(t.into()));
    }

    pub fn test_packet_type(&self, t: impl Into<u8>) -> bool {
        std::slice::from_ref(&self.type_mask).test_bit(packet_type_bit(t.into()))
    }

    pub fn set_all_packet_types(&mut self) {
        self.type_mask = u32::MAX;
    }

    pub fn set_event(&mut self, e: impl Into<u8>) {
        self.event_mask.set_bit(event_bit(e.into()));
    }

    pub fn clear_event(&mut self, e: impl Into<u8>) {
        self.event_mask.clear_bit(event_bit(e.into()));
    }

    pub fn test_event(&self, e: impl Into<u8>) -> bool {
        self.event_mask.test_bit(event_bit(e.into()))
    }

    pub fn set_all_events(&mut self) {
        self.event_mask = [u32::MAX; 2];
    }

    pub fn set_opcode(&mut self, opcode: u16) {
        self.opcode = opcode;
    }

    pub fn clear_opcode(&mut self) {
        self.opcode = 0;
    }

    pub fn test_opcode(&self, opcode: u16) -> bool {
        self.opcode == opcode
    }

    /// Packs the filter in host byte order, matching the kernel's layout
    /// without trailing padding.
    pub fn to_bytes(&self) -> [u8; FILTER_SIZE] {
        let mut buf = BytesMut::with_capacity(FILTER_SIZE);
        buf.put_slice(&self.type_mask.to_ne_bytes());
        buf.put_slice(&self.event_mask[0].to_ne_bytes());
        buf.put_slice(&self.event_mask[1].to_ne_bytes());
        buf.put_slice(&self.opcode.to_ne_bytes());
        let mut out = [0u8; FILTER_SIZE];
        out.copy_from_slice(&buf);
        out
    }

    pub fn from_bytes(data: impl AsRef<[u8]>) -> Result<Self, FilterError> {
        let mut data = data.as_ref();
        if data.len() != FILTER_SIZE {
            return Err(FilterError::InvalidLength(data.len()));
        }
        let read_u32 = |buf: &mut &[u8]| {
            let mut word = [0u8; 4];
            buf.copy_to_slice(&mut word);
            u32::from_ne_bytes(word)
        };
        let type_mask = read_u32(&mut data);
        let event_mask = [read_u32(&mut data), read_u32(&mut data)];
        let mut half = [0u8; 2];
        data.copy_to_slice(&mut half);
        Ok(Self {
            type_mask,
            event_mask,
            opcode: u16::from_ne_bytes(half),
        })
    }
}
