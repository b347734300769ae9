//! GPIO |     Function          |      Notes
//! -----+-----------------------+----------------------------------
//!  2   | LED battery red       | Active HIGH
//!  4   | LED network           | Active HIGH
//!  5   | Screen BUSY           | Busy signal from the e-paper panel
//! 12   | LED battery green     | Active HIGH
//! 14   | Screen power enable   | Active LOW
//! 15   | LED Wi-Fi             | Active LOW
//! 18   | Screen RST            | Reset
//! 19   | Screen DC             | Data/Command select
//! 21   | Screen CS             | Chip select
//! 23   | Screen DIN            | SPI2 MOSI
//! 25   | HTS221 DRDY           | Data ready from humidity sensor
//! 26   | APDS9960 INT          | Gesture/proximity interrupt
//! 27   | Sensor power enable   | Active LOW, gates every I2C sensor
//! 32   | I2C0 SCL              |
//! 33   | I2C0 SDA              |
//! 34   | Wake-up button        | Input only

// ----- Buttons -----
pub const BUTTON_WAKEUP: u8 = 34;
pub const BUTTON_A: u8 = BUTTON_WAKEUP;

// ----- LEDs -----
pub const LED_NETWORK: u8 = 4;
pub const LED_WIFI: u8 = 15; // active LOW
pub const LED_BAT_GREEN: u8 = 12;
pub const LED_BAT_RED: u8 = 2;

// ----- Power enables (both active LOW) -----
pub const POWER_ON_SENSOR: u8 = 27;
pub const POWER_ON_SCREEN: u8 = 14;

// ----- Sensor interrupts -----
pub const SENSOR_HTS221_DRDY: u8 = 25;
pub const SENSOR_APDS9960_INT: u8 = 26;

// ----- I2C0 -----
pub const I2C0_SCL: u8 = 32;
pub const I2C0_SDA: u8 = 33;

// ----- E-paper screen -----
pub const SCREEN_BUSY: u8 = 5;
pub const SCREEN_RST: u8 = 18;
pub const SCREEN_DC: u8 = 19;
pub const SCREEN_CS: u8 = 21;
pub const SCREEN_DIN: u8 = 23;

pub const OUTPUT_PINS: [u8; 6] = [
    LED_NETWORK,
    LED_WIFI,
    LED_BAT_GREEN,
    LED_BAT_RED,
    POWER_ON_SENSOR,
    POWER_ON_SCREEN,
];
pub const INPUT_PINS: [u8; 2] = [SENSOR_HTS221_DRDY, SENSOR_APDS9960_INT];

/// Grouped pin selection for a single GPIO configuration call.
pub const OUTPUT_PIN_MASK: u64 = pin_mask(&OUTPUT_PINS);
pub const INPUT_PIN_MASK: u64 = pin_mask(&INPUT_PINS);

pub const fn pin_mask(pins: &[u8]) -> u64 {
    let mut mask = 0u64;
    let mut i = 0;
    while i < pins.len() {
        mask |= 1u64 << pins[i];
        i += 1;
    }
    mask
}
