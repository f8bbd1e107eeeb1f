//! Block-average downsampling.
//!
//! Each output cell is the per-channel mean of one `f x f` block of the input.
//! Channels are summed first and divided once, truncating toward zero, so a
//! block sitting between two levels rounds down. That bias is part of the
//! output the classifier was calibrated on; keep it.

use crate::color::{pack, unpack};
use crate::image::{ColorGrid, HighResImage, HI_RES, LO_RES, SCALE};

/// Average the `factor x factor` block at block coordinates `(x, y)` of a
/// square, row-major `src` with side `side`.
pub fn average_block(src: &[u16], side: usize, factor: usize, x: usize, y: usize) -> u16 {
    let mut sum = [0u32; 3];

    for row in src[y * factor * side..].chunks(side).take(factor) {
        for &word in &row[x * factor..(x + 1) * factor] {
            let c = unpack(word);
            sum[0] += c.low as u32;
            sum[1] += c.mid as u32;
            sum[2] += c.high as u32;
        }
    }

    let n = (factor * factor) as u32;
    // pack() re-masks each channel to its width
    pack((sum[0] / n) as u16, (sum[1] / n) as u16, (sum[2] / n) as u16)
}

/// Downsample a square `src_side` image into a square `dst_side` image.
///
/// `src_side` must be a multiple of `dst_side`; anything else is a caller bug.
pub fn downsample_into(src: &[u16], src_side: usize, dst: &mut [u16], dst_side: usize) {
    debug_assert!(dst_side > 0 && src_side % dst_side == 0);
    debug_assert_eq!(src.len(), src_side * src_side);
    debug_assert_eq!(dst.len(), dst_side * dst_side);

    let factor = src_side / dst_side;
    for y in 0..dst_side {
        for x in 0..dst_side {
            dst[y * dst_side + x] = average_block(src, src_side, factor, x, y);
        }
    }
}

/// Shrink the 224x224 capture into the 28x28 color grid.
pub fn shrink(src: &HighResImage<'_>, dst: &mut ColorGrid) {
    downsample_into(src.as_slice(), HI_RES, dst.as_mut_slice(), LO_RES);
    log::debug!("shrink: {}x{} -> {}x{} (block {})", HI_RES, HI_RES, LO_RES, LO_RES, SCALE);
}
