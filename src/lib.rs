#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod classifier;
pub mod color;
pub mod downsample;
pub mod dump;
pub mod ft6x06_touch;
pub mod grayscale;
pub mod image;
pub mod input;
pub mod layout;
pub mod surface;
pub mod ui;

#[cfg(feature = "devkit-esp32s3-ili9341")]
pub mod display;
#[cfg(feature = "devkit-esp32s3-ili9341")]
pub mod wiring;

#[cfg(test)]
mod testutil;
