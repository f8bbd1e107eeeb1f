//! Screen rendering for the drawing pad.
//!
//! This module provides:
//! - `draw_input_screen`: the framed drawing box and the RUN button
//! - `draw_dot`: one touch dot
//! - `draw_preview`: the 28x28 downsampled image at the display origin
//!
//! Everything is drawn through embedded-graphics, so any `DrawTarget<Color = Rgb565>` works.

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::{Point, Primitive, RgbColor, Size},
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
    Drawable,
};

use crate::color::to_rgb565;
use crate::image::{ColorGrid, LO_RES};
use crate::layout::{Layout, BOX_THICKNESS};

pub const PAPER: Rgb565 = Rgb565::WHITE;
pub const FRAME: Rgb565 = Rgb565::BLACK;
pub const INK: Rgb565 = Rgb565::BLACK;

// Label position inside the run button
const LABEL_OFFSET: Point = Point::new(20, 12);

pub fn draw_input_screen<D>(disp: &mut D, layout: &Layout) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    disp.clear(PAPER)?;

    // Frames are drawn as solid blocks, then hollowed out
    disp.fill_solid(&layout.drawing_box_outer.to_rectangle(), FRAME)?;
    disp.fill_solid(&layout.run_button.to_rectangle(), FRAME)?;
    disp.fill_solid(&layout.drawing_box_inner.to_rectangle(), PAPER)?;
    disp.fill_solid(&layout.run_button.inset(BOX_THICKNESS).to_rectangle(), PAPER)?;

    Text::with_baseline(
        "RUN",
        layout.run_button.top_left() + LABEL_OFFSET,
        MonoTextStyle::new(&FONT_10X20, FRAME),
        Baseline::Top,
    )
    .draw(disp)?;

    Ok(())
}

/// Filled dot of `radius` around `center`.
pub fn draw_dot<D>(disp: &mut D, center: Point, radius: u32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, 2 * radius + 1)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(disp)
}

/// Clear to paper and draw the grid 1:1 at the origin.
pub fn draw_preview<D>(disp: &mut D, grid: &ColorGrid) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    disp.clear(PAPER)?;
    let area = Rectangle::new(Point::zero(), Size::new(LO_RES as u32, LO_RES as u32));
    disp.fill_contiguous(&area, grid.as_slice().iter().map(|&w| to_rgb565(w)))
}
