// Host to Bluetooth byte order conversions. Bluetooth fields are always
// little-endian, so these are the identity on little-endian hosts.

#[inline]
pub fn htobs(value: u16) -> u16 {
    value.to_le()
}

#[inline]
pub fn htobl(value: u32) -> u32 {
    value.to_le()
}

#[inline]
pub fn htobll(value: u64) -> u64 {
    value.to_le()
}

#[inline]
pub fn btohs(value: u16) -> u16 {
    u16::from_le(value)
}

#[inline]
pub fn btohl(value: u32) -> u32 {
    u32::from_le(value)
}

#[inline]
pub fn btohll(value: u64) -> u64 {
    u64::from_le(value)
}

// Maps a negative `value` of width `bits` into its unsigned encoding.
//
// Uses `2 << (bits - 1)` as the modulus. Only the low `bits` bits of the
// result are meaningful on the wire.
#[inline]
pub fn twos_complement(value: i32, bits: u32) -> u32 {
    if value < 0 {
        (value + (2 << (bits - 1))) as u32
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_trip_through_wire_order() {
        assert_eq!(btohs(htobs(0x1234)), 0x1234);
        assert_eq!(btohl(htobl(0xDEAD_BEEF)), 0xDEAD_BEEF);
        assert_eq!(btohll(htobll(0x0102_0304_0506_0708)), 0x0102_0304_0506_0708);
        assert_eq!(htobs(0x004C).to_ne_bytes(), [0x4C, 0x00]);
        assert_eq!(htobl(0x0A0B_0C0D).to_ne_bytes(), [0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn twos_complement_of_calibrated_power() {
        assert_eq!(twos_complement(-59, 8), 197);
        assert_eq!(twos_complement(-59, 8) as u8, 0xC5);
        assert_eq!(twos_complement(-29, 8) as u8, (-29i8) as u8);
        assert_eq!(twos_complement(-1, 8), 0xFF);
        assert_eq!(twos_complement(-128, 8), 0x80);
    }

    #[test]
    fn twos_complement_passes_non_negative_through() {
        assert_eq!(twos_complement(0, 8), 0);
        assert_eq!(twos_complement(4, 8), 4);
        assert_eq!(twos_complement(127, 8), 127);
    }
}
