use crate::info::{BoardInfo, MESHKIT_SENSE_INFO};
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum I2cMode {
    Master,
    Slave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct I2cConfig {
    pub port: u8,
    pub mode: I2cMode,
    pub clock_hz: u32,
    pub scl: u8,
    pub sda: u8,
    pub scl_pullup: bool,
    pub sda_pullup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiConfig {
    pub host: u8,
    pub mosi: u8,
    /// `None` for write-only buses.
    pub miso: Option<u8>,
    pub sclk: u8,
    pub clock_hz: u32,
}

/// Compile-time board configuration. A `Some` bus config enables that resource at `init`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    pub info: &'static BoardInfo,
    pub i2c0: Option<I2cConfig>,
    pub spi2: Option<SpiConfig>,
    pub sensor_power_at_init: bool,
    pub screen_power_at_init: bool,
}

// standard mode, 100 kHz
pub const MESHKIT_SENSE_I2C0: I2cConfig = I2cConfig {
    port: 0,
    mode: I2cMode::Master,
    clock_hz: 100_000,
    scl: pins::I2C0_SCL,
    sda: pins::I2C0_SDA,
    scl_pullup: true,
    sda_pullup: true,
};

// the screen's clock line is not routed in this board revision, so SPI2 stays off
pub const MESHKIT_SENSE: BoardConfig = BoardConfig {
    info: &MESHKIT_SENSE_INFO,
    i2c0: Some(MESHKIT_SENSE_I2C0),
    spi2: None,
    sensor_power_at_init: true,
    screen_power_at_init: false,
};

impl Default for BoardConfig {
    fn default() -> Self {
        MESHKIT_SENSE
    }
}
