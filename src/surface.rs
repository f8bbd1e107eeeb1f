//! Display surfaces that can be read back.
//!
//! The capture step needs pixel read-back, which SPI panels driven through
//! `mipidsi` cannot provide. `ShadowedDisplay` keeps an RGB565 copy of every
//! pixel written to the wrapped panel and answers reads from that copy.

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb565,
    prelude::{IntoStorage, OriginDimensions, Point, Size},
    primitives::Rectangle,
    Pixel,
};

use crate::color::to_rgb565;
use crate::image::ScratchError;

/// A drawable RGB565 surface with pixel read-back.
pub trait PixelSurface: DrawTarget<Color = Rgb565> + OriginDimensions {
    fn read_pixel(&mut self, point: Point) -> Result<Rgb565, Self::Error>;
}

#[derive(Debug)]
pub enum ShadowError<E> {
    Panel(E),
    OutOfBounds(Point),
}

pub struct ShadowedDisplay<'fb, D> {
    panel: D,
    size: Size,
    fb: &'fb mut [u16],
}

impl<'fb, D> ShadowedDisplay<'fb, D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    /// `fb` must hold exactly one cell per panel pixel. Its current content is
    /// taken as what the panel shows; clear the display before relying on it.
    pub fn new(panel: D, fb: &'fb mut [u16]) -> Result<Self, ScratchError> {
        let size = panel.size();
        let expected = (size.width as usize) * (size.height as usize);
        if fb.len() != expected {
            return Err(ScratchError::WrongLength {
                expected,
                actual: fb.len(),
            });
        }
        Ok(Self { panel, size, fb })
    }

    pub fn panel(&self) -> &D {
        &self.panel
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((y * self.size.width + x) as usize)
    }
}

impl<D> OriginDimensions for ShadowedDisplay<'_, D> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<D> DrawTarget for ShadowedDisplay<'_, D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    type Color = Rgb565;
    type Error = ShadowError<D::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        let fb = &mut *self.fb;

        // Clip once here so the shadow and the panel see the same pixels
        let shadowed = pixels
            .into_iter()
            .filter(|Pixel(p, _)| p.x >= 0 && p.y >= 0 && p.x < w && p.y < h)
            .map(|Pixel(p, c)| {
                fb[(p.y * w + p.x) as usize] = c.into_storage();
                Pixel(p, c)
            });

        self.panel.draw_iter(shadowed).map_err(ShadowError::Panel)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        let clipped = area.intersection(&Rectangle::new(Point::zero(), self.size));
        if clipped.size.width == 0 || clipped.size.height == 0 {
            return Ok(());
        }

        let w = self.size.width as usize;
        let raw = color.into_storage();
        let x0 = clipped.top_left.x as usize;
        let span = clipped.size.width as usize;
        for y in clipped.rows() {
            let start = y as usize * w + x0;
            self.fb[start..start + span].fill(raw);
        }

        self.panel.fill_solid(&clipped, color).map_err(ShadowError::Panel)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.fb.fill(color.into_storage());
        self.panel.clear(color).map_err(ShadowError::Panel)
    }
}

impl<D> PixelSurface for ShadowedDisplay<'_, D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn read_pixel(&mut self, point: Point) -> Result<Rgb565, Self::Error> {
        match self.index(point) {
            Some(i) => Ok(to_rgb565(self.fb[i])),
            None => Err(ShadowError::OutOfBounds(point)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{canvas, NullPanel};
    use embedded_graphics::{
        prelude::{Primitive, RgbColor},
        primitives::{Circle, PrimitiveStyle},
        Drawable,
    };

    #[test]
    fn rejects_mismatched_framebuffer() {
        let mut fb = vec![0u16; 10];
        let err = ShadowedDisplay::new(NullPanel::new(4, 4), &mut fb).err();
        assert_eq!(err, Some(ScratchError::WrongLength { expected: 16, actual: 10 }));
    }

    #[test]
    fn reads_back_drawn_pixels() {
        let mut disp = canvas(32, 24);
        disp.clear(Rgb565::WHITE).unwrap();
        Pixel(Point::new(3, 4), Rgb565::RED).draw(&mut disp).unwrap();

        assert_eq!(disp.read_pixel(Point::new(3, 4)).unwrap(), Rgb565::RED);
        assert_eq!(disp.read_pixel(Point::new(4, 4)).unwrap(), Rgb565::WHITE);
    }

    #[test]
    fn clips_and_forwards() {
        let mut disp = canvas(16, 16);
        disp.clear(Rgb565::BLACK).unwrap();
        let before = disp.panel().pixels_drawn;
        Circle::with_center(Point::new(0, 0), 9)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut disp)
            .unwrap();

        assert_eq!(disp.read_pixel(Point::new(1, 1)).unwrap(), Rgb565::GREEN);
        assert_eq!(disp.read_pixel(Point::new(10, 10)).unwrap(), Rgb565::BLACK);
        // only the in-bounds quarter of the circle reached the panel
        let drawn = disp.panel().pixels_drawn - before;
        assert!(drawn > 0 && drawn < 81);
    }

    #[test]
    fn fill_solid_updates_shadow() {
        let mut disp = canvas(20, 10);
        disp.clear(Rgb565::WHITE).unwrap();
        disp.fill_solid(&Rectangle::new(Point::new(15, 5), Size::new(10, 10)), Rgb565::BLUE)
            .unwrap();

        assert_eq!(disp.read_pixel(Point::new(19, 9)).unwrap(), Rgb565::BLUE);
        assert_eq!(disp.read_pixel(Point::new(14, 9)).unwrap(), Rgb565::WHITE);
        assert_eq!(disp.read_pixel(Point::new(19, 4)).unwrap(), Rgb565::WHITE);
    }

    #[test]
    fn out_of_bounds_read_is_an_error() {
        let mut disp = canvas(8, 8);
        assert!(matches!(
            disp.read_pixel(Point::new(8, 0)),
            Err(ShadowError::OutOfBounds(_))
        ));
        assert!(matches!(
            disp.read_pixel(Point::new(0, -1)),
            Err(ShadowError::OutOfBounds(_))
        ));
    }
}
