//! Display setup and initialization module.
//
// - ILI9341 (240x320 native, driven as 320x240 landscape) via mipidsi.
// - The panel is write-only over SPI, so it is wrapped in a
//   `ShadowedDisplay` whose framebuffer answers the capture's pixel reads.

use embedded_graphics::{pixelcolor::Rgb565, prelude::RgbColor, draw_target::DrawTarget};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    delay::Delay,
    gpio::Output,
    spi::master::{Config as SpiConfig, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::ILI9341Rgb565,
    options::{ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder,
};

use crate::surface::ShadowedDisplay;
use crate::wiring::DisplayPins;

/// Landscape size seen by the application.
pub const WIDTH: u32 = 320;
pub const HEIGHT: u32 = 240;
pub const FB_LEN: usize = (WIDTH * HEIGHT) as usize;

pub type PanelType<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    ILI9341Rgb565,
    Output<'a>,
>;

pub type DisplayType<'a> = ShadowedDisplay<'a, PanelType<'a>>;

pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    spi_buf: &'a mut [u8],
    fb: &'a mut [u16],
) -> DisplayType<'a> {
    let DisplayPins {
        spi2,
        sck,
        mosi,
        cs,
        dc,
        rst,
        mut bl,
    } = display_pins;

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_mhz(40))
        .with_mode(Mode::_0);

    let spi = Spi::new(spi2, spi_cfg)
        .expect("SPI2 config rejected")
        .with_sck(sck)
        .with_mosi(mosi);

    let spi_dev = ExclusiveDevice::new(spi, cs, NoDelay).expect("SPI device");
    let di = SpiInterface::new(spi_dev, dc, spi_buf);
    let mut delay = Delay::new();

    // Native portrait size; the rotation swaps it to 320x240
    let mut panel = DisplayBuilder::new(ILI9341Rgb565, di)
        .display_size(HEIGHT as u16, WIDTH as u16)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .color_order(ColorOrder::Bgr)
        .reset_pin(rst)
        .init(&mut delay)
        .expect("ILI9341 init failed");

    // Panel and shadow must agree before the first read-back
    panel.clear(Rgb565::WHITE).expect("ILI9341 clear failed");
    fb.fill(0xFFFF);
    bl.set_high();

    ShadowedDisplay::new(panel, fb).expect("framebuffer does not match the panel")
}
