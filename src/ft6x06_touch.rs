//! Minimal FocalTech FT6x06 capacitive touch driver (FT6206 / FT6236 / FT6336U).
//! Polling mode only: one read of TD_STATUS + first touch point per call.
//! Raw panel coordinates go through a `TouchTransform` so callers get display
//! coordinates for the panel's rotation.

use embedded_hal::i2c;

use crate::input::{TouchSample, TouchSensor};

pub const DEFAULT_I2C_ADDR: u8 = 0x38;

const REG_TD_STATUS: u8 = 0x02; // touch count, followed by P1_XH..P1_YL
const REG_TH_GROUP: u8 = 0x80; // touch threshold
const REG_G_MODE: u8 = 0xA4; // 0 = polling, 1 = trigger
const REG_CHIP_ID: u8 = 0xA3;

const CHIP_FT6206: u8 = 0x06;
const CHIP_FT6236: u8 = 0x36;
const CHIP_FT6336U: u8 = 0x64;

const MAX_POINTS: u8 = 2;
const EVENT_LIFT_UP: u8 = 0b01;
const DEFAULT_THRESHOLD: u8 = 128;

/// Maps raw panel coordinates to display coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TouchTransform {
    pub swap_xy: bool,
    pub mirror_x: bool,
    pub mirror_y: bool,
    /// Display size after the swap.
    pub width: u16,
    pub height: u16,
}

impl TouchTransform {
    pub const fn identity(width: u16, height: u16) -> Self {
        Self {
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
            width,
            height,
        }
    }

    /// Portrait panel mounted for a landscape display rotated by 90 degrees.
    pub const fn landscape(width: u16, height: u16) -> Self {
        Self {
            swap_xy: true,
            mirror_x: false,
            mirror_y: true,
            width,
            height,
        }
    }

    pub fn apply(&self, raw_x: u16, raw_y: u16) -> (i32, i32) {
        let (mut x, mut y) = if self.swap_xy {
            (raw_y as i32, raw_x as i32)
        } else {
            (raw_x as i32, raw_y as i32)
        };
        if self.mirror_x {
            x = self.width as i32 - 1 - x;
        }
        if self.mirror_y {
            y = self.height as i32 - 1 - y;
        }
        (x, y)
    }
}

#[derive(Debug)]
pub enum TouchError<E> {
    Bus(E),
    BadChipId(u8),
}

impl<E> From<E> for TouchError<E> {
    fn from(e: E) -> Self {
        TouchError::Bus(e)
    }
}

pub struct Ft6x06<I2C> {
    i2c: I2C,
    address: u8,
    transform: TouchTransform,
}

impl<I2C> Ft6x06<I2C>
where
    I2C: i2c::ErrorType + i2c::I2c,
{
    pub fn new(
        i2c: I2C,
        address: u8,
        transform: TouchTransform,
    ) -> Result<Self, TouchError<I2C::Error>> {
        let mut this = Self {
            i2c,
            address,
            transform,
        };
        this.init()?;
        Ok(this)
    }

    pub fn chip_id(&mut self) -> Result<u8, TouchError<I2C::Error>> {
        self.read_reg(REG_CHIP_ID)
    }

    fn init(&mut self) -> Result<(), TouchError<I2C::Error>> {
        let id = self.chip_id()?;
        if !matches!(id, CHIP_FT6206 | CHIP_FT6236 | CHIP_FT6336U) {
            return Err(TouchError::BadChipId(id));
        }

        self.write_reg(REG_TH_GROUP, DEFAULT_THRESHOLD)?;
        self.write_reg(REG_G_MODE, 0x00)?;
        log::debug!("ft6x06: chip 0x{:02X} ready at 0x{:02X}", id, self.address);
        Ok(())
    }

    fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), TouchError<I2C::Error>> {
        self.i2c.write(self.address, &[reg, val])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, TouchError<I2C::Error>> {
        let mut out = [0u8];
        self.i2c.write_read(self.address, &[reg], &mut out)?;
        Ok(out[0])
    }

    /// Read the first touch point, already transformed.
    pub fn read_sample(&mut self) -> Result<TouchSample, TouchError<I2C::Error>> {
        // TD_STATUS, P1_XH, P1_XL, P1_YH, P1_YL
        let mut buf = [0u8; 5];
        self.i2c.write_read(self.address, &[REG_TD_STATUS], &mut buf)?;

        let points = buf[0] & 0x0F;
        let event = buf[1] >> 6;
        // 0x0F after power-up means no valid frame yet
        if points == 0 || points > MAX_POINTS || event == EVENT_LIFT_UP {
            return Ok(TouchSample::NONE);
        }

        let raw_x = (((buf[1] & 0x0F) as u16) << 8) | buf[2] as u16;
        let raw_y = (((buf[3] & 0x0F) as u16) << 8) | buf[4] as u16;
        let (x, y) = self.transform.apply(raw_x, raw_y);
        Ok(TouchSample::at(x, y))
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

impl<I2C> TouchSensor for Ft6x06<I2C>
where
    I2C: i2c::ErrorType + i2c::I2c,
{
    type Error = TouchError<I2C::Error>;

    fn poll(&mut self) -> Result<TouchSample, Self::Error> {
        self.read_sample()
    }
}
