// Kernel ABI definitions for raw HCI sockets.
#![allow(non_camel_case_types)]

use crate::filter::Filter;

pub const BTPROTO_HCI: i32 = 1;
pub const SOL_HCI: i32 = 0;
pub const HCI_FILTER: i32 = 2;

// HCI filter
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct hci_filter {
    pub type_mask: u32,
    pub event_mask: [u32; 2],
    pub opcode: u16,
}

impl From<Filter> for hci_filter {
    fn from(f: Filter) -> Self {
        hci_filter {
            type_mask: f.type_mask,
            event_mask: f.event_mask,
            opcode: f.opcode,
        }
    }
}

impl From<hci_filter> for Filter {
    fn from(f: hci_filter) -> Self {
        Filter {
            type_mask: f.type_mask,
            event_mask: f.event_mask,
            opcode: f.opcode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::hci_filter;
    use crate::filter::Filter;

    #[test]
    fn kernel_struct_layout() {
        // Two trailing padding bytes follow `opcode`.
        assert_eq!(std::mem::size_of::<hci_filter>(), 16);
        assert_eq!(std::mem::align_of::<hci_filter>(), 4);
    }

    #[test]
    fn converts_both_ways() {
        let mut filter = Filter::new();
        filter.set_packet_type(0x04u8);
        filter.set_event(0x13u8);
        filter.set_opcode(0x2008);
        let raw: hci_filter = filter.into();
        assert_eq!(raw.type_mask, 1 << 0x04);
        assert_eq!(raw.event_mask, [1 << 0x13, 0]);
        assert_eq!(raw.opcode, 0x2008);
        assert_eq!(Filter::from(raw), filter);
    }
}
