//! Host-side stand-ins for the board collaborators.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::vec::Vec;

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb565,
    prelude::{OriginDimensions, Size},
    Pixel,
};

use crate::image::HighResImage;
use crate::input::{TouchSample, TouchSensor};
use crate::surface::ShadowedDisplay;

/// Write-only panel that only counts what reaches it.
pub struct NullPanel {
    size: Size,
    pub pixels_drawn: usize,
}

impl NullPanel {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels_drawn: 0,
        }
    }
}

impl OriginDimensions for NullPanel {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for NullPanel {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        self.pixels_drawn += pixels.into_iter().count();
        Ok(())
    }
}

pub fn canvas(width: u32, height: u32) -> ShadowedDisplay<'static, NullPanel> {
    let fb = Vec::leak(vec![0u16; (width * height) as usize]);
    ShadowedDisplay::new(NullPanel::new(width, height), fb).unwrap()
}

pub fn hi_res_scratch() -> &'static mut [u16] {
    Vec::leak(vec![0u16; HighResImage::LEN])
}

/// Transport that keeps every byte. `fail_next` rejects one write.
#[derive(Default)]
pub struct ByteLog {
    pub bytes: Vec<u8>,
    pub flushes: usize,
    pub fail_next: bool,
}

impl embedded_io::ErrorType for ByteLog {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for ByteLog {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(embedded_io::ErrorKind::BrokenPipe);
        }
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Touch sensor replaying a fixed list of samples, then reporting no touch.
#[derive(Default)]
pub struct ScriptedTouch {
    samples: VecDeque<TouchSample>,
}

impl ScriptedTouch {
    pub fn new(samples: impl IntoIterator<Item = TouchSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl TouchSensor for ScriptedTouch {
    type Error = Infallible;

    fn poll(&mut self) -> Result<TouchSample, Self::Error> {
        Ok(self.samples.pop_front().unwrap_or(TouchSample::NONE))
    }
}
