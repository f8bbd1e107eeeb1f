//! RGB565 channel packing.
//!
//! A packed word carries three channels at fixed bit offsets:
//! - `low`  in bits 0-4 (5 bits, blue in `Rgb565` terms)
//! - `mid`  in bits 5-10 (6 bits, green)
//! - `high` in bits 11-15 (5 bits, red)
//!
//! Packing masks every channel to its width, so out-of-range inputs wrap
//! silently instead of failing. Callers keep values in range.

use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::{IntoStorage, RgbColor},
};

pub const LOW_MASK: u16 = 0x1F;
pub const MID_MASK: u16 = 0x3F;
pub const HIGH_MASK: u16 = 0x1F;

const MID_SHIFT: u16 = 5;
const HIGH_SHIFT: u16 = 11;

/// The three unpacked channel intensities of one packed word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Channels {
    pub low: u16,
    pub mid: u16,
    pub high: u16,
}

impl Channels {
    pub const fn new(low: u16, mid: u16, high: u16) -> Self {
        Self { low, mid, high }
    }

    #[inline]
    pub const fn pack(self) -> u16 {
        pack(self.low, self.mid, self.high)
    }
}

#[inline]
pub const fn pack(low: u16, mid: u16, high: u16) -> u16 {
    (low & LOW_MASK) | ((mid & MID_MASK) << MID_SHIFT) | ((high & HIGH_MASK) << HIGH_SHIFT)
}

#[inline]
pub const fn unpack(word: u16) -> Channels {
    Channels {
        low: word & LOW_MASK,
        mid: (word >> MID_SHIFT) & MID_MASK,
        high: (word >> HIGH_SHIFT) & HIGH_MASK,
    }
}

// Surfaces speak Rgb565, the image math speaks packed words.
#[inline]
pub fn to_rgb565(word: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(word))
}

#[inline]
pub fn from_rgb565(color: Rgb565) -> u16 {
    color.into_storage()
}

impl From<Rgb565> for Channels {
    fn from(color: Rgb565) -> Self {
        Channels::new(color.b() as u16, color.g() as u16, color.r() as u16)
    }
}

impl From<Channels> for Rgb565 {
    fn from(c: Channels) -> Self {
        to_rgb565(c.pack())
    }
}
