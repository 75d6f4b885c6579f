// Bit addressing over a buffer of 32-bit words.
//
// Bit `nr` lives in word `nr >> 5` at position `nr & 31`. Indexing past the
// end of the buffer panics like any other slice access; use the `checked_*`
// variants when the index is not already known to be in range.

const WORD_BITS: usize = 32;

pub trait BitField {
    // Total number of addressable bits.
    fn bit_len(&self) -> usize;

    fn set_bit(&mut self, nr: usize);

    fn clear_bit(&mut self, nr: usize);

    fn test_bit(&self, nr: usize) -> bool;

    fn checked_set_bit(&mut self, nr: usize) -> Option<()> {
        if nr >= self.bit_len() {
            return None;
        }
        self.set_bit(nr);
        Some(())
    }

    fn checked_clear_bit(&mut self, nr: usize) -> Option<()> {
        if nr >= self.bit_len() {
            return None;
        }
        self.clear_bit(nr);
        Some(())
    }

    fn checked_test_bit(&self, nr: usize) -> Option<bool> {
        if nr >= self.bit_len() {
            return None;
        }
        Some(self.test_bit(nr))
    }
}

#[inline]
fn locate(nr: usize) -> (usize, u32) {
    (nr >> 5, 1 << (nr & (WORD_BITS - 1)))
}

impl BitField for [u32] {
    fn bit_len(&self) -> usize {
        self.len() * WORD_BITS
    }

    fn set_bit(&mut self, nr: usize) {
        let (word, mask) = locate(nr);
        self[word] |= mask;
    }

    fn clear_bit(&mut self, nr: usize) {
        let (word, mask) = locate(nr);
        self[word] &= !mask;
    }

    fn test_bit(&self, nr: usize) -> bool {
        let (word, mask) = locate(nr);
        self[word] & mask != 0
    }
}

impl<const N: usize> BitField for [u32; N] {
    fn bit_len(&self) -> usize {
        self.as_slice().bit_len()
    }

    fn set_bit(&mut self, nr: usize) {
        self.as_mut_slice().set_bit(nr)
    }

    fn clear_bit(&mut self, nr: usize) {
        self.as_mut_slice().clear_bit(nr)
    }

    fn test_bit(&self, nr: usize) -> bool {
        self.as_slice().test_bit(nr)
    }
}

#[cfg(test)]
mod tests {
    use super::BitField;

    #[test]
    fn set_and_clear_within_first_word() {
        let mut words = [0u32; 1];
        words.set_bit(4);
        assert_eq!(words[0], 0x10);
        assert!(words.test_bit(4));
        assert!(!words.test_bit(3));
        words.clear_bit(4);
        assert_eq!(words[0], 0);
    }

    #[test]
    fn bits_spill_into_the_next_word() {
        let mut words = [0u32; 2];
        words.set_bit(31);
        words.set_bit(32);
        words.set_bit(63);
        assert_eq!(words, [0x8000_0000, 0x8000_0001]);
        words.clear_bit(31);
        assert_eq!(words, [0, 0x8000_0001]);
    }

    #[test]
    fn set_bit_leaves_other_bits_untouched() {
        let mut words = [0xFFFF_0000u32, 0x0000_FFFF];
        words.set_bit(0);
        words.clear_bit(48);
        assert_eq!(words, [0xFFFF_0001, 0x0000_FFFF]);
        words.clear_bit(47);
        assert_eq!(words, [0xFFFF_0001, 0x0000_7FFF]);
    }

    #[test]
    fn checked_access_rejects_out_of_range() {
        let mut words = [0u32; 2];
        assert_eq!(words.bit_len(), 64);
        assert_eq!(words.checked_set_bit(64), None);
        assert_eq!(words.checked_clear_bit(100), None);
        assert_eq!(words.checked_test_bit(64), None);
        assert_eq!(words.checked_set_bit(63), Some(()));
        assert_eq!(words.checked_test_bit(63), Some(true));
        assert_eq!(words.checked_clear_bit(63), Some(()));
        assert_eq!(words.checked_test_bit(63), Some(false));
    }

    #[test]
    #[should_panic]
    fn unchecked_access_past_the_end_panics() {
        let mut words = [0u32; 1];
        words.set_bit(32);
    }

    #[test]
    fn works_on_slices() {
        let mut words = vec![0u32; 3];
        let slice = words.as_mut_slice();
        slice.set_bit(70);
        assert!(slice.test_bit(70));
        assert_eq!(words[2], 1 << 6);
    }
}
