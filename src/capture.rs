//! Capture pipeline: drawing box -> classifier input.
//!
//! One run walks the stages in order and never re-enters:
//!
//! `Idle -> Capturing -> Shrinking -> Rendering -> Converting -> Transmitting
//! -> Finalizing -> Ready`
//!
//! - Capturing: read the 224x224 inner drawing box off the surface.
//! - Shrinking: block-average down to 28x28 colors.
//! - Rendering: clear the screen and show the 28x28 preview at the origin.
//! - Converting: colors to grayscale bytes.
//! - Transmitting: diagnostic dump over the byte transport.
//! - Finalizing: copy into the classifier input and classify.
//!
//! `Ready` behaves like `Idle` for the next run. All buffers belong to the
//! pipeline and are reused; nothing is allocated per run.

use embedded_graphics::prelude::Point;

use crate::classifier::{Classifier, ClassifierCode};
use crate::color::from_rgb565;
use crate::downsample::shrink;
use crate::dump::write_dump;
use crate::grayscale::{to_grayscale, WHITE_LEVEL};
use crate::image::{ClassifierInput, ColorGrid, GrayGrid, HighResImage, ScratchError, HI_RES};
use crate::layout::Layout;
use crate::surface::PixelSurface;
use crate::ui;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureStage {
    Idle,
    Capturing,
    Shrinking,
    Rendering,
    Converting,
    Transmitting,
    Finalizing,
    Ready,
}

#[derive(Debug)]
pub enum CaptureError<SurfaceE, TransportE> {
    Surface(SurfaceE),
    Transport(TransportE),
}

/// Outcome of one capture cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CaptureReport {
    pub code: ClassifierCode,
    /// Grayscale cells darker than paper white.
    pub ink_cells: usize,
}

pub struct CapturePipeline<'buf> {
    hi: HighResImage<'buf>,
    color: ColorGrid,
    gray: GrayGrid,
    input: ClassifierInput,
    stage: CaptureStage,
}

impl<'buf> CapturePipeline<'buf> {
    /// `scratch` backs the 224x224 capture and must hold `HighResImage::LEN`
    /// cells.
    pub fn new(scratch: &'buf mut [u16]) -> Result<Self, ScratchError> {
        Ok(Self {
            hi: HighResImage::new(scratch)?,
            color: ColorGrid::new(),
            gray: GrayGrid::new(),
            input: ClassifierInput::new(),
            stage: CaptureStage::Idle,
        })
    }

    /// Stage reached by the last run. After a failure this is the stage that
    /// failed.
    pub fn last_stage(&self) -> CaptureStage {
        self.stage
    }

    pub fn high_res(&self) -> &HighResImage<'buf> {
        &self.hi
    }

    pub fn colors(&self) -> &ColorGrid {
        &self.color
    }

    pub fn grayscale(&self) -> &GrayGrid {
        &self.gray
    }

    pub fn input(&self) -> &ClassifierInput {
        &self.input
    }

    /// Capture, shrink, preview, convert and dump, leaving the classifier
    /// input ready.
    pub fn capture<D, T>(
        &mut self,
        layout: &Layout,
        surface: &mut D,
        transport: &mut T,
    ) -> Result<&ClassifierInput, CaptureError<D::Error, T::Error>>
    where
        D: PixelSurface,
        T: embedded_io::Write,
    {
        self.stage = CaptureStage::Capturing;
        let origin = layout.drawing_box_inner.top_left();
        for y in 0..HI_RES {
            let row = self.hi.row_mut(y);
            for (x, cell) in row.iter_mut().enumerate() {
                let p = origin + Point::new(x as i32, y as i32);
                *cell = from_rgb565(surface.read_pixel(p).map_err(CaptureError::Surface)?);
            }
        }

        self.stage = CaptureStage::Shrinking;
        shrink(&self.hi, &mut self.color);

        self.stage = CaptureStage::Rendering;
        ui::draw_preview(surface, &self.color).map_err(CaptureError::Surface)?;

        self.stage = CaptureStage::Converting;
        to_grayscale(&self.color, &mut self.gray);

        self.stage = CaptureStage::Transmitting;
        write_dump(transport, &self.gray).map_err(CaptureError::Transport)?;

        self.stage = CaptureStage::Finalizing;
        self.input.copy_from(&self.gray);
        Ok(&self.input)
    }

    /// Full cycle: `capture` followed by the classifier call.
    pub fn run<D, T, C>(
        &mut self,
        layout: &Layout,
        surface: &mut D,
        transport: &mut T,
        classifier: &mut C,
    ) -> Result<CaptureReport, CaptureError<D::Error, T::Error>>
    where
        D: PixelSurface,
        T: embedded_io::Write,
        C: Classifier + ?Sized,
    {
        self.capture(layout, surface, transport)?;

        let code = classifier.classify(self.input.as_bytes());
        let ink_cells = self
            .gray
            .as_slice()
            .iter()
            .filter(|&&v| v != WHITE_LEVEL)
            .count();
        self.stage = CaptureStage::Ready;

        log::info!("capture: classifier returned {} ({} ink cells)", code, ink_cells);
        Ok(CaptureReport { code, ink_cells })
    }
}
