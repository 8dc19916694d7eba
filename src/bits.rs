//! Bit-level helpers for subnet masks.
//!
//! A subnet mask is valid if its 32-bit pattern, read most-significant-bit first, is a run of 1s
//! followed by a run of 0s. Validity and prefix length are determined by scanning the rendered
//! bit string, which keeps the two degenerate masks (all zeros and all ones) unexceptional.


/// Renders a 32-bit value as a string of 32 `'1'` and `'0'` characters, most significant bit
/// first.
pub fn value_to_binary(value: u32) -> String {
    format!("{:032b}", value)
}

/// Whether the given value is a contiguous prefix mask: no `'0'` bit may occur before the last
/// `'1'` bit. The all-zero value is a valid mask (prefix 0).
pub fn is_prefix_mask(value: u32) -> bool {
    let bit_string = value_to_binary(value);
    match bit_string.rfind('1') {
        Some(last_one) => !bit_string[..last_one].contains('0'),
        None => true,
    }
}

/// Returns the prefix length of a mask: the position of the last `'1'` bit plus one, or 0 if no
/// bit is set. Only meaningful for values accepted by [`is_prefix_mask`].
pub fn prefix_length(mask: u32) -> u32 {
    match value_to_binary(mask).rfind('1') {
        Some(last_one) => (last_one as u32) + 1,
        None => 0,
    }
}

/// Builds the mask with the given number of leading 1 bits. Prefix 0 is handled explicitly; the
/// shift-by-32 it would otherwise require is not defined for `u32`. The prefix must be at most 32.
pub fn mask_from_prefix(prefix: u32) -> u32 {
    if prefix == 0 {
        0
    } else {
        (!0u32) << (32 - prefix)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_value_to_binary() {
        assert_eq!("00000000000000000000000000000000", value_to_binary(0x00000000));
        assert_eq!("11111111111111111111111111111111", value_to_binary(0xFFFFFFFF));
        assert_eq!("11111111111111111111111100000000", value_to_binary(0xFFFFFF00));
        assert_eq!("00000000000000000000000000000001", value_to_binary(0x00000001));
    }

    #[test]
    fn test_canonical_masks_accepted() {
        for prefix in 0..=32 {
            let mask = mask_from_prefix(prefix);
            assert!(is_prefix_mask(mask), "prefix {} mask {:08X}", prefix, mask);
            assert_eq!(prefix, prefix_length(mask));
        }
    }

    #[test]
    fn test_noncontiguous_masks_rejected() {
        assert!(!is_prefix_mask(0x00000001));
        assert!(!is_prefix_mask(0x80000001));
        assert!(!is_prefix_mask(0xFF00FF00));
        assert!(!is_prefix_mask(0xFFFF00FF));
        assert!(!is_prefix_mask(0x0000FFFF));
        assert!(!is_prefix_mask(0x7FFFFFFF));
        assert!(!is_prefix_mask(0xFFFEFFFF));
    }

    #[test]
    fn test_mask_from_prefix() {
        assert_eq!(0x00000000, mask_from_prefix(0));
        assert_eq!(0x80000000, mask_from_prefix(1));
        assert_eq!(0xFF000000, mask_from_prefix(8));
        assert_eq!(0xFFF00000, mask_from_prefix(12));
        assert_eq!(0xFFFF0000, mask_from_prefix(16));
        assert_eq!(0xFFFFFF00, mask_from_prefix(24));
        assert_eq!(0xFFFFFFFE, mask_from_prefix(31));
        assert_eq!(0xFFFFFFFF, mask_from_prefix(32));
    }
}
