//! Touch input routing.
//!
//! This module provides:
//! - `TouchSample` and the `TouchSensor` polling contract
//! - `Router`, which turns one touch sample per tick into a dot, a capture, or nothing
//!
//! The router is polled from a single cooperative loop. A capture runs to
//! completion inside `poll`, so a second run cannot start while one is in
//! flight and nothing else can draw on the surface meanwhile.

use embedded_graphics::{pixelcolor::Rgb565, prelude::Point};

use crate::capture::{CaptureError, CapturePipeline, CaptureReport, CaptureStage};
use crate::classifier::Classifier;
use crate::layout::{Hit, Layout, DOT_RADIUS};
use crate::surface::PixelSurface;
use crate::ui;

/// One poll of the touch sensor, in display coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
    pub detected: bool,
}

impl TouchSample {
    pub const NONE: Self = Self {
        x: 0,
        y: 0,
        detected: false,
    };

    pub const fn at(x: i32, y: i32) -> Self {
        Self { x, y, detected: true }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub trait TouchSensor {
    type Error;

    fn poll(&mut self) -> Result<TouchSample, Self::Error>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RouterConfig {
    pub dot_radius: u32,
    pub ink: Rgb565,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            dot_radius: DOT_RADIUS,
            ink: ui::INK,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouterEvent {
    /// No touch this tick.
    Idle,
    Drew(Point),
    Classified(CaptureReport),
    /// Touch outside both regions.
    Ignored(Point),
}

#[derive(Debug)]
pub enum RouterError<TouchE, SurfaceE, TransportE> {
    Touch(TouchE),
    Surface(SurfaceE),
    Transport(TransportE),
}

impl<TouchE, SurfaceE, TransportE> From<CaptureError<SurfaceE, TransportE>>
    for RouterError<TouchE, SurfaceE, TransportE>
{
    fn from(e: CaptureError<SurfaceE, TransportE>) -> Self {
        match e {
            CaptureError::Surface(e) => Self::Surface(e),
            CaptureError::Transport(e) => Self::Transport(e),
        }
    }
}

pub struct Router<'buf, S, C, T> {
    layout: Layout,
    config: RouterConfig,
    sensor: S,
    classifier: C,
    transport: T,
    pipeline: CapturePipeline<'buf>,
}

impl<'buf, S, C, T> Router<'buf, S, C, T>
where
    S: TouchSensor,
    C: Classifier,
    T: embedded_io::Write,
{
    pub fn new(
        layout: Layout,
        config: RouterConfig,
        sensor: S,
        classifier: C,
        transport: T,
        pipeline: CapturePipeline<'buf>,
    ) -> Self {
        Self {
            layout,
            config,
            sensor,
            classifier,
            transport,
            pipeline,
        }
    }

    /// Draw the input screen and let the classifier prepare itself.
    pub fn start<D: PixelSurface>(&mut self, surface: &mut D) -> Result<(), D::Error> {
        self.draw_input_screen(surface)?;
        self.classifier.prepare();
        log::info!("Started");
        Ok(())
    }

    pub fn draw_input_screen<D: PixelSurface>(&self, surface: &mut D) -> Result<(), D::Error> {
        ui::draw_input_screen(surface, &self.layout)
    }

    /// Poll the sensor once and act on the sample.
    pub fn poll<D: PixelSurface>(
        &mut self,
        surface: &mut D,
    ) -> Result<RouterEvent, RouterError<S::Error, D::Error, T::Error>> {
        let sample = self.sensor.poll().map_err(RouterError::Touch)?;
        self.handle(sample, surface)
    }

    /// Act on one sample. Split from `poll` so samples from elsewhere (a
    /// replay, another sensor) route the same way.
    pub fn handle<D: PixelSurface>(
        &mut self,
        sample: TouchSample,
        surface: &mut D,
    ) -> Result<RouterEvent, RouterError<S::Error, D::Error, T::Error>> {
        if !sample.detected {
            return Ok(RouterEvent::Idle);
        }

        let point = sample.point();
        match self.layout.hit(point, self.config.dot_radius) {
            Hit::Draw => {
                ui::draw_dot(surface, point, self.config.dot_radius, self.config.ink)
                    .map_err(RouterError::Surface)?;
                Ok(RouterEvent::Drew(point))
            }
            Hit::Run => {
                log::info!("Save image");
                match self.pipeline.run(
                    &self.layout,
                    surface,
                    &mut self.transport,
                    &mut self.classifier,
                ) {
                    Ok(report) => Ok(RouterEvent::Classified(report)),
                    Err(e) => {
                        // Past Capturing the preview has replaced the input screen
                        if self.pipeline.last_stage() != CaptureStage::Capturing
                            && self.draw_input_screen(surface).is_err()
                        {
                            log::warn!("input screen redraw failed");
                        }
                        Err(e.into())
                    }
                }
            }
            Hit::Outside => {
                log::trace!("touch ignored at ({}, {})", point.x, point.y);
                Ok(RouterEvent::Ignored(point))
            }
        }
    }

    pub fn pipeline(&self) -> &CapturePipeline<'buf> {
        &self.pipeline
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the collaborators.
    pub fn release(self) -> (S, C, T) {
        (self.sensor, self.classifier, self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::START_MARKER;
    use crate::testutil::{canvas, hi_res_scratch, ByteLog, NullPanel, ScriptedTouch};
    use crate::surface::ShadowedDisplay;
    use embedded_graphics::prelude::RgbColor;

    type TestRouter<C> = Router<'static, ScriptedTouch, C, ByteLog>;

    fn router<C: Classifier>(samples: Vec<TouchSample>, classifier: C) -> TestRouter<C> {
        Router::new(
            Layout::for_display(320, 240).unwrap(),
            RouterConfig::default(),
            ScriptedTouch::new(samples),
            classifier,
            ByteLog::default(),
            CapturePipeline::new(hi_res_scratch()).unwrap(),
        )
    }

    fn screen(r: &mut TestRouter<impl Classifier>) -> ShadowedDisplay<'static, NullPanel> {
        let mut disp = canvas(320, 240);
        r.start(&mut disp).unwrap();
        disp
    }

    #[test]
    fn no_touch_is_idle() {
        let mut r = router(vec![TouchSample::NONE], |_: &[u8]| 0);
        let mut disp = screen(&mut r);
        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Idle);
        // script exhausted, still idle
        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Idle);
    }

    #[test]
    fn draws_inside_box_and_accumulates() {
        let mut r = router(
            vec![TouchSample::at(50, 60), TouchSample::at(120, 120)],
            |_: &[u8]| 0,
        );
        let mut disp = screen(&mut r);

        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Drew(Point::new(50, 60)));
        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Drew(Point::new(120, 120)));
        assert_eq!(disp.read_pixel(Point::new(50, 60)).unwrap(), Rgb565::BLACK);
        assert_eq!(disp.read_pixel(Point::new(120, 120)).unwrap(), Rgb565::BLACK);
        assert_eq!(disp.read_pixel(Point::new(90, 90)).unwrap(), Rgb565::WHITE);
    }

    #[test]
    fn edge_touches_do_not_paint_the_frame() {
        let mut r = router(vec![TouchSample::at(9, 100)], |_: &[u8]| 0);
        let mut disp = screen(&mut r);

        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Ignored(Point::new(9, 100)));
        assert_eq!(disp.read_pixel(Point::new(9, 100)).unwrap(), Rgb565::WHITE);
    }

    #[test]
    fn run_button_classifies_drawing() {
        let mut calls = 0;
        let mut r = router(
            vec![
                TouchSample::at(20, 20),
                TouchSample::at(250, 120),
                TouchSample::NONE,
            ],
            |input: &[u8]| {
                calls += 1;
                input.iter().filter(|&&b| b != 255).count() as i32
            },
        );
        let mut disp = screen(&mut r);

        r.poll(&mut disp).unwrap();
        match r.poll(&mut disp).unwrap() {
            RouterEvent::Classified(report) => {
                // a 5 px dot touches one 8x8 block
                assert_eq!(report.ink_cells, 1);
                assert_eq!(report.code, 1);
            }
            other => panic!("expected a classification, got {other:?}"),
        }
        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Idle);
        assert!(r.transport_mut().bytes.starts_with(START_MARKER));

        let (_sensor, classifier, transport) = r.release();
        drop(classifier);
        assert_eq!(transport.flushes, 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_run_restores_input_screen() {
        let mut r = router(
            vec![
                TouchSample::at(92, 92),
                TouchSample::at(250, 120),
                TouchSample::at(250, 120),
            ],
            |input: &[u8]| input.iter().filter(|&&b| b != 255).count() as i32,
        );
        let mut disp = screen(&mut r);

        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Drew(Point::new(92, 92)));
        r.transport_mut().fail_next = true;
        assert!(matches!(
            r.poll(&mut disp),
            Err(RouterError::Transport(embedded_io::ErrorKind::BrokenPipe))
        ));
        assert_eq!(r.pipeline().last_stage(), CaptureStage::Transmitting);

        // preview gone, frame back
        assert_eq!(disp.read_pixel(Point::new(10, 10)).unwrap(), Rgb565::WHITE);
        assert_eq!(disp.read_pixel(Point::new(6, 6)).unwrap(), Rgb565::BLACK);
        assert_eq!(disp.read_pixel(Point::new(240, 100)).unwrap(), Rgb565::BLACK);

        // the next run sees an empty box
        match r.poll(&mut disp).unwrap() {
            RouterEvent::Classified(report) => {
                assert_eq!(report.ink_cells, 0);
                assert_eq!(report.code, 0);
            }
            other => panic!("expected a classification, got {other:?}"),
        }
        assert!(r.pipeline().input().as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn outside_touch_is_ignored() {
        let mut r = router(
            vec![TouchSample::at(300, 10), TouchSample::at(-4, 50)],
            |_: &[u8]| 0,
        );
        let mut disp = screen(&mut r);

        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Ignored(Point::new(300, 10)));
        assert_eq!(r.poll(&mut disp).unwrap(), RouterEvent::Ignored(Point::new(-4, 50)));
        assert!(r.transport_mut().bytes.is_empty());
    }
}
