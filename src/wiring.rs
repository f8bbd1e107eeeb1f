// Board pin mapping for the ESP32-S3 drawing pad.
// Profiles are selected with Cargo features; the default profile is an
// ESP32-S3 DevKitC with a 2.8" ILI9341 + FT6206 capacitive touch breakout.
//! The following wiring is assumed:
//! - LCD SCK  => GPIO12
//! - LCD MOSI => GPIO11
//! - LCD CS   => GPIO10
//! - LCD D/C  => GPIO9
//! - LCD RST  => GPIO8
//! - LCD BL   => GPIO7
//! - Touch SDA => GPIO4
//! - Touch SCL => GPIO5
//! - Dump UART TX => GPIO17 (UART1, 115200 8N1)
//! - Dump UART RX => GPIO18
//! - Heartbeat LED => GPIO2
//! - GND => GND, 3.3V => 3.3V

use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{
    Peripherals, GPIO11, GPIO12, GPIO17, GPIO18, GPIO4, GPIO5, I2C0, SPI2, UART1,
};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub sck: GPIO12<'a>,
    pub mosi: GPIO11<'a>,
    pub cs: Output<'a>,
    pub dc: Output<'a>,
    pub rst: Output<'a>,
    pub bl: Output<'a>,
}

pub struct TouchPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO4<'a>,
    pub scl: GPIO5<'a>,
}

pub struct SerialPins<'a> {
    pub uart1: UART1<'a>,
    pub tx: GPIO17<'a>,
    pub rx: GPIO18<'a>,
}

pub struct BoardPins<'a> {
    pub heartbeat: Output<'a>,
    pub display_pins: DisplayPins<'a>,
    pub touch_pins: TouchPins<'a>,
    pub serial_pins: SerialPins<'a>,
}

pub fn init_board_pins(p: Peripherals) -> BoardPins<'static> {
    let heartbeat = Output::new(p.GPIO2, Level::Low, OutputConfig::default());

    // LCD control pins; GPIO11/12 stay raw for the SPI driver
    let cs = Output::new(p.GPIO10, Level::High, OutputConfig::default());
    let dc = Output::new(p.GPIO9, Level::Low, OutputConfig::default());
    let rst = Output::new(p.GPIO8, Level::High, OutputConfig::default());
    let bl = Output::new(p.GPIO7, Level::High, OutputConfig::default());

    BoardPins {
        heartbeat,
        display_pins: DisplayPins {
            spi2: p.SPI2,
            sck: p.GPIO12,
            mosi: p.GPIO11,
            cs,
            dc,
            rst,
            bl,
        },
        touch_pins: TouchPins {
            i2c0: p.I2C0,
            sda: p.GPIO4,
            scl: p.GPIO5,
        },
        serial_pins: SerialPins {
            uart1: p.UART1,
            tx: p.GPIO17,
            rx: p.GPIO18,
        },
    }
}
