//! Digit Pad
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features devkit-esp32s3-ili9341
//! ========================================
//!
//! Draw a digit in the box with a finger, press RUN to capture, downsample
//! and hand the 28x28 image to the classifier. The grayscale image is dumped
//! on UART1 for inspection.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

esp_bootloader_esp_idf::esp_app_desc!();

use digit_pad::{
    capture::CapturePipeline,
    display::{setup_display, FB_LEN},
    ft6x06_touch::{Ft6x06, TouchTransform, DEFAULT_I2C_ADDR},
    image::HighResImage,
    input::{Router, RouterConfig, RouterEvent},
    layout::Layout,
    wiring::{init_board_pins, BoardPins, SerialPins, TouchPins},
};

use esp_backtrace as _;

use esp_hal::{
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    main, psram,
    time::Rate,
    uart::{Config as UartConfig, Uart},
    Config,
};

use embedded_graphics::prelude::OriginDimensions;
use log::{info, warn};

// Allocator for PSRAM
extern crate alloc;
use alloc::{boxed::Box, vec};

// One poll per tick
const TICK_MS: u32 = 1;
const HEARTBEAT_TICKS: u32 = 500;
// How long the 28x28 preview stays up before the input screen comes back
const PREVIEW_HOLD_MS: u32 = 1500;

static mut SPI_BUF: [u8; 512] = [0; 512];

#[cfg(feature = "nn-classifier")]
fn make_classifier() -> digit_pad::classifier::ExternClassifier {
    extern "C" {
        fn nn_setup();
        fn nn_classify(input: *const u8, len: u32) -> i32;
    }
    // SAFETY: the linked model reads exactly `len` bytes and keeps no pointer
    unsafe { digit_pad::classifier::ExternClassifier::new(nn_classify, Some(nn_setup)) }
}

#[cfg(not(feature = "nn-classifier"))]
fn make_classifier() -> digit_pad::classifier::NullClassifier {
    digit_pad::classifier::NullClassifier
}

#[main]
fn main() -> ! {
    // Initialize peripherals
    let peripherals = esp_hal::init(Config::default());

    esp_alloc::psram_allocator!(&peripherals.PSRAM, psram);
    esp_println::logger::init_logger_from_env();

    let BoardPins {
        mut heartbeat,
        display_pins,
        touch_pins,
        serial_pins,
    } = init_board_pins(peripherals);

    // -------------------- Dump transport --------------------
    let SerialPins { uart1, tx, rx } = serial_pins;
    let uart = Uart::new(uart1, UartConfig::default().with_baudrate(115_200))
        .expect("UART1 config rejected")
        .with_tx(tx)
        .with_rx(rx);
    info!("UART online");

    // -------------------- Display --------------------
    let fb: &'static mut [u16] = Box::leak(vec![0u16; FB_LEN].into_boxed_slice());
    // Safe because SPI_BUF is only used here
    #[allow(static_mut_refs)]
    let mut display = unsafe { setup_display(display_pins, &mut SPI_BUF, fb) };

    let size = display.size();
    let layout = Layout::for_display(size.width, size.height).expect("display too small for the pad");

    // -------------------- Touch --------------------
    let TouchPins { i2c0, sda, scl } = touch_pins;
    let i2c = I2c::new(i2c0, I2cConfig::default().with_frequency(Rate::from_khz(400)))
        .expect("I2C0 config rejected")
        .with_sda(sda)
        .with_scl(scl);
    let transform = TouchTransform::landscape(size.width as u16, size.height as u16);
    let touch = Ft6x06::new(i2c, DEFAULT_I2C_ADDR, transform).expect("FT6x06 not found");

    // -------------------- Pipeline --------------------
    // 224x224 capture scratch, allocated once and reused by every run
    let scratch: &'static mut [u16] = Box::leak(vec![0u16; HighResImage::LEN].into_boxed_slice());
    let pipeline = CapturePipeline::new(scratch).expect("capture scratch size");

    let mut router = Router::new(
        layout,
        RouterConfig::default(),
        touch,
        make_classifier(),
        // esp-hal's Uart is the embedded-io byte transport
        uart,
        pipeline,
    );
    if let Err(e) = router.start(&mut display) {
        warn!("input screen draw failed: {:?}", e);
    }

    let delay = Delay::new();
    let mut tick: u32 = 0;

    // Main loop: one touch poll per tick
    loop {
        match router.poll(&mut display) {
            Ok(RouterEvent::Classified(report)) => {
                info!("result {} ({} ink cells)", report.code, report.ink_cells);
                delay.delay_millis(PREVIEW_HOLD_MS);
                if let Err(e) = router.draw_input_screen(&mut display) {
                    warn!("input screen draw failed: {:?}", e);
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("poll failed: {:?} (stage {:?})", e, router.pipeline().last_stage());
            }
        }

        tick = tick.wrapping_add(1);
        if tick % HEARTBEAT_TICKS == 0 {
            heartbeat.toggle();
        }
        delay.delay_millis(TICK_MS);
    }
}
