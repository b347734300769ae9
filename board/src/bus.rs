use crate::config::{I2cConfig, SpiConfig};

/// Platform bus drivers the board builds its resources from.
///
/// Firmware implements this on top of the MCU HAL: `create_*` claims the
/// peripheral and pins named in the config, `delete_*` hands them back.
pub trait BusProvider {
    type I2c;
    type Spi;
    type Error;

    fn create_i2c(&mut self, config: &I2cConfig) -> Result<Self::I2c, Self::Error>;
    fn delete_i2c(&mut self, bus: Self::I2c) -> Result<(), Self::Error>;
    fn create_spi(&mut self, config: &SpiConfig) -> Result<Self::Spi, Self::Error>;
    fn delete_spi(&mut self, bus: Self::Spi) -> Result<(), Self::Error>;
}
