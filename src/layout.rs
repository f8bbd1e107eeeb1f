//! Screen regions of the drawing pad.
//!
//! The layout is derived once from the display size:
//! - a square drawing box (224 px inside a 2 px frame), inset from the top,
//!   left and bottom edges by the same margin;
//! - a run button 40 px high, right of the box, vertically centered.
//!
//! On the 320x240 panel the margin is 6, the inner box spans x/y 8..232 and
//! the run button spans x 240..314, y 100..140.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::image::HI_RES;

pub const BOX_THICKNESS: i32 = 2;
pub const DRAW_AREA_SIDE: i32 = HI_RES as i32;
pub const RUN_BUTTON_HEIGHT: i32 = 40;
/// Radius of the dot painted for each touch sample.
pub const DOT_RADIUS: u32 = 2;

/// Region bounds as edges: `x_max = x_min + width`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x + width,
            y_max: y + height,
        }
    }

    pub const fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub const fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub const fn inset(&self, by: i32) -> Self {
        Self {
            x_min: self.x_min + by,
            y_min: self.y_min + by,
            x_max: self.x_max - by,
            y_max: self.y_max - by,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    pub fn center(&self) -> Point {
        Point::new((self.x_min + self.x_max) / 2, (self.y_min + self.y_max) / 2)
    }

    /// Inclusive on both edges, like the panel's hit areas.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            self.top_left(),
            Size::new(self.width().max(0) as u32, self.height().max(0) as u32),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The display cannot fit the framed drawing box vertically.
    TooShort { height: u32 },
    /// Nothing is left for the run button right of the drawing box.
    TooNarrow { width: u32 },
}

/// Where a touch landed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    Draw,
    Run,
    Outside,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub display: Size,
    pub margin: i32,
    pub drawing_box_outer: Rect,
    pub drawing_box_inner: Rect,
    pub run_button: Rect,
}

impl Layout {
    pub fn for_display(width: u32, height: u32) -> Result<Self, LayoutError> {
        let (w, h) = (width as i32, height as i32);
        let framed = DRAW_AREA_SIDE + 2 * BOX_THICKNESS;
        if h < framed {
            return Err(LayoutError::TooShort { height });
        }

        let margin = (h - framed) / 2;
        let drawing_box_outer = Rect::new(margin, margin, framed, framed);
        let drawing_box_inner = drawing_box_outer.inset(BOX_THICKNESS);

        let run_x = 2 * margin + 2 * BOX_THICKNESS + DRAW_AREA_SIDE;
        let run_w = w - DRAW_AREA_SIDE - 3 * margin - 2 * BOX_THICKNESS;
        // the button needs an interior inside its own frame
        if run_w <= 2 * BOX_THICKNESS {
            return Err(LayoutError::TooNarrow { width });
        }
        let run_y = h / 2 - RUN_BUTTON_HEIGHT / 2;
        let run_button = Rect::new(run_x, run_y, run_w, RUN_BUTTON_HEIGHT);

        Ok(Self {
            display: Size::new(width, height),
            margin,
            drawing_box_outer,
            drawing_box_inner,
            run_button,
        })
    }

    /// True when a dot of `dot_radius` centered on `(x, y)` stays inside the
    /// inner drawing box.
    pub fn point_in_drawing_box(&self, x: i32, y: i32, dot_radius: u32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let r = dot_radius as i32;
        let inner = &self.drawing_box_inner;
        x >= inner.x_min + r && x <= inner.x_max - r && y >= inner.y_min + r && y <= inner.y_max - r
    }

    pub fn point_in_run_button(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.run_button.contains(x, y)
    }

    /// Drawing takes priority over the run button.
    pub fn hit(&self, point: Point, dot_radius: u32) -> Hit {
        if self.point_in_drawing_box(point.x, point.y, dot_radius) {
            Hit::Draw
        } else if self.point_in_run_button(point.x, point.y) {
            Hit::Run
        } else {
            Hit::Outside
        }
    }
}
