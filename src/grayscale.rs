//! Packed color to grayscale byte.
//!
//! Not a standard luminance transform. The classifier was calibrated on this
//! exact arithmetic, bias included:
//!
//! ```text
//! ((high + mid5 + low + 3) / 3 * 8 - 1) & 0xFF
//! ```
//!
//! `mid5` is the green field read through a 5-bit mask, so its top bit is
//! dropped and all three terms share the 0..=31 range before the `256 / 32`
//! expansion.

use crate::image::{ColorGrid, GrayGrid, LO_RES};

const CHANNEL_MASK: u16 = 0x1F;
const ROUNDING_BIAS: u16 = 3;
const CHANNEL_COUNT: u16 = 3;
const EXPAND: u16 = 256 / 32;

/// Grayscale value of paper white (`0xFFFF`).
pub const WHITE_LEVEL: u8 = luminance(0xFFFF);

#[inline]
pub const fn luminance(word: u16) -> u8 {
    let high = (word >> 11) & CHANNEL_MASK;
    let mid = (word >> 5) & CHANNEL_MASK;
    let low = word & CHANNEL_MASK;

    let avg = (high + mid + low + ROUNDING_BIAS) / CHANNEL_COUNT;
    ((avg * EXPAND).wrapping_sub(1) & 0xFF) as u8
}

pub fn to_grayscale(src: &ColorGrid, dst: &mut GrayGrid) {
    for y in 0..LO_RES {
        for x in 0..LO_RES {
            dst.set(x, y, luminance(src.get(x, y)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::pack;

    #[test]
    fn black_is_seven() {
        assert_eq!(luminance(pack(0, 0, 0)), 7);
    }

    #[test]
    fn full_scale_is_255() {
        // (31 + 31 + 31 + 3) / 3 * 8 - 1 = 255; green's top bit is masked off
        assert_eq!(luminance(pack(31, 63, 31)), 255);
        assert_eq!(WHITE_LEVEL, 255);
    }

    #[test]
    fn mid_tone() {
        // (5 + 20 + 10 + 3) / 3 = 12 -> 12 * 8 - 1 = 95
        assert_eq!(luminance(pack(10, 20, 5)), 95);
    }

    #[test]
    fn green_top_bit_is_ignored() {
        assert_eq!(luminance(pack(4, 0x20 | 6, 9)), luminance(pack(4, 6, 9)));
    }

    #[test]
    fn converts_whole_grid() {
        let mut colors = ColorGrid::new();
        colors.as_mut_slice().fill(0xFFFF);
        colors.set(2, 3, 0x0000);

        let mut gray = GrayGrid::new();
        to_grayscale(&colors, &mut gray);
        assert_eq!(gray.get(2, 3), 7);
        assert_eq!(gray.as_slice().iter().filter(|&&v| v == 255).count(), LO_RES * LO_RES - 1);
    }
}
