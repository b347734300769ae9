#![no_std]

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

// register map: ST HTS221 datasheet, DocID026333
// readings stay in fixed point (tenths) so callers don't need an fpu

pub const HTS221_ADDRESS: SevenBitAddress = 0x5f;
pub const HTS221_ID: u8 = 0xbc;

const WHO_AM_I: u8 = 0x0f;
const CTRL_REG1: u8 = 0x20;
const STATUS_REG: u8 = 0x27;
const HUMIDITY_OUT_L: u8 = 0x28;
const CALIBRATION_START: u8 = 0x30;
// MSB of the sub-address enables auto-increment for multi-byte reads
const AUTO_INCREMENT: u8 = 0x80;
// PD | BDU | ODR = 1 Hz
const CTRL_REG1_ACTIVE: u8 = 0x85;
const CTRL_REG1_POWER_DOWN: u8 = 0x00;
const STATUS_H_DA: u8 = 0x02;
const STATUS_T_DA: u8 = 0x01;

#[derive(Debug, PartialEq)]
pub enum Hts221Error<E> {
    I2C(E),
    InvalidDevice(u8),
    InvalidCalibration,
    NotInitialized,
}

#[derive(Debug, PartialEq)]
pub struct Hts221Reading {
    /// Relative humidity in 0.1 %rH, clamped to 0..=1000.
    pub humidity: u16,
    /// Temperature in 0.1 degC.
    pub temperature: i16,
}

impl Hts221Reading {
    pub fn new(humidity: u16, temperature: i16) -> Self {
        Self { humidity, temperature }
    }
}

/// Factory calibration points, two per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Calibration {
    h0_rh_x2: i32,
    h1_rh_x2: i32,
    h0_t0_out: i32,
    h1_t0_out: i32,
    t0_degc_x8: i32,
    t1_degc_x8: i32,
    t0_out: i32,
    t1_out: i32,
}

impl Calibration {
    // `r` is the register block 0x30..=0x3f
    fn from_registers(r: &[u8; 16]) -> Self {
        let msb = r[5] as i32;
        Self {
            h0_rh_x2: r[0] as i32,
            h1_rh_x2: r[1] as i32,
            t0_degc_x8: ((msb & 0x03) << 8) | r[2] as i32,
            t1_degc_x8: ((msb & 0x0c) << 6) | r[3] as i32,
            h0_t0_out: join_i16(r[6], r[7]) as i32,
            h1_t0_out: join_i16(r[10], r[11]) as i32,
            t0_out: join_i16(r[12], r[13]) as i32,
            t1_out: join_i16(r[14], r[15]) as i32,
        }
    }

    fn is_valid(&self) -> bool {
        self.h1_t0_out != self.h0_t0_out && self.t1_out != self.t0_out
    }

    fn humidity(&self, raw: i16) -> u16 {
        let span = self.h1_t0_out - self.h0_t0_out;
        let scaled = self.h0_rh_x2 * span + (raw as i32 - self.h0_t0_out) * (self.h1_rh_x2 - self.h0_rh_x2);
        (scaled * 10 / (2 * span)).clamp(0, 1000) as u16
    }

    fn temperature(&self, raw: i16) -> i16 {
        let span = self.t1_out - self.t0_out;
        let scaled = self.t0_degc_x8 * span + (raw as i32 - self.t0_out) * (self.t1_degc_x8 - self.t0_degc_x8);
        (scaled * 10 / (8 * span)) as i16
    }
}

#[inline]
fn join_i16(lsb: u8, msb: u8) -> i16 {
    i16::from_le_bytes([lsb, msb])
}

pub struct Hts221<I2C> {
    i2c: I2C,
    calibration: Option<Calibration>,
}

impl<I2C: I2c> Hts221<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, calibration: None }
    }

    /// Verify the device id, start continuous conversion and load the calibration block.
    pub async fn init(&mut self) -> Result<(), Hts221Error<I2C::Error>> {
        let mut id = [0u8; 1];
        self.i2c.write_read(HTS221_ADDRESS, &[WHO_AM_I], &mut id).await.map_err(Hts221Error::I2C)?;
        if id[0] != HTS221_ID {
            return Err(Hts221Error::InvalidDevice(id[0]));
        }

        self.i2c.write(HTS221_ADDRESS, &[CTRL_REG1, CTRL_REG1_ACTIVE]).await.map_err(Hts221Error::I2C)?;

        let mut registers = [0u8; 16];
        self.i2c
            .write_read(HTS221_ADDRESS, &[CALIBRATION_START | AUTO_INCREMENT], &mut registers)
            .await
            .map_err(Hts221Error::I2C)?;
        let calibration = Calibration::from_registers(&registers);
        if !calibration.is_valid() {
            return Err(Hts221Error::InvalidCalibration);
        }
        log::debug!("hts221 calibration loaded: {:?}", calibration);
        self.calibration = Some(calibration);
        Ok(())
    }

    /// True once both humidity and temperature have a fresh sample.
    pub async fn data_ready(&mut self) -> Result<bool, Hts221Error<I2C::Error>> {
        let mut status = [0u8; 1];
        self.i2c.write_read(HTS221_ADDRESS, &[STATUS_REG], &mut status).await.map_err(Hts221Error::I2C)?;
        Ok(status[0] & (STATUS_H_DA | STATUS_T_DA) == (STATUS_H_DA | STATUS_T_DA))
    }

    /// Read the latest sample and convert it with the factory calibration.
    pub async fn read(&mut self) -> Result<Hts221Reading, Hts221Error<I2C::Error>> {
        let calibration = self.calibration.ok_or(Hts221Error::NotInitialized)?;
        let mut data = [0u8; 4];
        self.i2c
            .write_read(HTS221_ADDRESS, &[HUMIDITY_OUT_L | AUTO_INCREMENT], &mut data)
            .await
            .map_err(Hts221Error::I2C)?;
        let humidity = calibration.humidity(join_i16(data[0], data[1]));
        let temperature = calibration.temperature(join_i16(data[2], data[3]));
        Ok(Hts221Reading::new(humidity, temperature))
    }

    /// Stop conversions. `init` must run again before the next `read`.
    pub async fn power_down(&mut self) -> Result<(), Hts221Error<I2C::Error>> {
        self.calibration = None;
        self.i2c.write(HTS221_ADDRESS, &[CTRL_REG1, CTRL_REG1_POWER_DOWN]).await.map_err(Hts221Error::I2C)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
