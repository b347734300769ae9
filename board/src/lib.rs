#![no_std]

//! Board support for the ESP32-MeshKit-Sense.
//!
//! `Board` owns the on-board buses and GPIO gates. Buses enabled in the
//! `BoardConfig` are created by `init` and handed out as shared handles keyed
//! by `ResourceId`; `deinit` releases them again. Handles borrow the board, so
//! the borrow checker keeps `init`/`deinit` from running while one is alive.

pub mod bus;
pub mod config;
pub mod error;
pub mod gate;
pub mod info;
pub mod pins;
pub mod resources;

pub use bus::BusProvider;
pub use config::{BoardConfig, I2cConfig, I2cMode, SpiConfig, MESHKIT_SENSE};
pub use error::{BoardError, BusFailure, BusFailures};
pub use gate::{Led, OutputGate, Polarity};
pub use info::BoardInfo;
pub use resources::{Handle, ResourceId, SharedBus};

use embedded_hal::digital::{ErrorType, StatefulOutputPin};
use crate::resources::{Resource, ResourceTable};

pub type Error<D, P> = BoardError<<D as BusProvider>::Error, <P as ErrorType>::Error>;

/// Output pins the board drives directly.
pub struct BoardPins<P> {
    pub sensor_power: P,
    pub screen_power: P,
    pub led_network: P,
    pub led_wifi: P,
    pub led_bat_green: P,
    pub led_bat_red: P,
}

pub struct Board<D: BusProvider, P> {
    config: BoardConfig,
    provider: D,
    resources: ResourceTable<D::I2c, D::Spi>,
    sensor_power: OutputGate<P>,
    screen_power: OutputGate<P>,
    // indexed by `Led`
    leds: [OutputGate<P>; 4],
    initialized: bool,
}

impl<D: BusProvider, P: StatefulOutputPin> Board<D, P> {
    pub fn new(config: BoardConfig, provider: D, pins: BoardPins<P>) -> Self {
        Self {
            config,
            provider,
            resources: ResourceTable::new(),
            sensor_power: OutputGate::new(pins.sensor_power, Polarity::ActiveLow),
            screen_power: OutputGate::new(pins.screen_power, Polarity::ActiveLow),
            leds: [
                OutputGate::new(pins.led_network, Led::Network.polarity()),
                OutputGate::new(pins.led_wifi, Led::Wifi.polarity()),
                OutputGate::new(pins.led_bat_green, Led::BatteryGreen.polarity()),
                OutputGate::new(pins.led_bat_red, Led::BatteryRed.polarity()),
            ],
            initialized: false,
        }
    }

    /// Drive the GPIO defaults and create every enabled bus.
    ///
    /// Calling this on an initialized board is a no-op. Bus creation is best
    /// effort: every enabled bus is attempted, and if any fails the ones
    /// created by this call are deleted again and all failures are returned.
    pub fn init(&mut self) -> Result<(), Error<D, P>> {
        if self.initialized {
            log::debug!("{} already initialized", self.config.info.name);
            return Ok(());
        }

        self.apply_gpio_defaults().map_err(BoardError::Gpio)?;

        let mut failures = BusFailures::new();
        if let Some(config) = self.config.i2c0 {
            match self.provider.create_i2c(&config) {
                Ok(bus) => self.resources.insert(ResourceId::I2c0, Resource::I2c(SharedBus::new(bus))),
                Err(error) => {
                    log::warn!("i2c{} init failed", config.port);
                    // capacity covers every resource id
                    let _ = failures.push(BusFailure { resource: ResourceId::I2c0, error });
                }
            }
        }
        if let Some(config) = self.config.spi2 {
            match self.provider.create_spi(&config) {
                Ok(bus) => self.resources.insert(ResourceId::Spi2, Resource::Spi(SharedBus::new(bus))),
                Err(error) => {
                    log::warn!("spi{} init failed", config.host);
                    let _ = failures.push(BusFailure { resource: ResourceId::Spi2, error });
                }
            }
        }

        if !failures.is_empty() {
            let leaked = self.release_resources();
            if !leaked.is_empty() {
                log::warn!("rollback could not release {} bus(es)", leaked.len());
            }
            return Err(BoardError::HardwareInit(failures));
        }

        self.initialized = true;
        log::info!("{} initialized", self.config.info.name);
        Ok(())
    }

    /// Delete every created bus and switch the power rails off.
    ///
    /// Safe on a board that was never (or only partly) initialized. State is
    /// cleared even when a bus reports an error on release.
    pub fn deinit(&mut self) -> Result<(), Error<D, P>> {
        let failures = self.release_resources();
        debug_assert!(self.resources.is_empty());
        self.initialized = false;

        if self.sensor_power.set(false).is_err() {
            log::warn!("sensor power off failed");
        }
        if self.screen_power.set(false).is_err() {
            log::warn!("screen power off failed");
        }

        log::info!("{} deinitialized", self.config.info.name);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(BoardError::HardwareDeinit(failures))
        }
    }

    pub fn is_init(&self) -> bool {
        self.initialized
    }

    /// Handle of an initialized resource, `None` for `Null` or a resource that is not up.
    pub fn get_handle(&self, id: ResourceId) -> Option<Handle<'_, D::I2c, D::Spi>> {
        if !self.initialized {
            return None;
        }
        self.resources.get(id)
    }

    /// Like `get_handle`, for ids that arrive as raw numbers.
    pub fn handle_by_raw(&self, raw: u8) -> Option<Handle<'_, D::I2c, D::Spi>> {
        ResourceId::try_from(raw).ok().and_then(|id| self.get_handle(id))
    }

    pub fn handle(&self, id: ResourceId) -> Result<Handle<'_, D::I2c, D::Spi>, Error<D, P>> {
        self.get_handle(id).ok_or(BoardError::InvalidResource(id))
    }

    pub fn i2c0(&self) -> Option<&SharedBus<D::I2c>> {
        self.get_handle(ResourceId::I2c0)?.as_i2c()
    }

    pub fn spi2(&self) -> Option<&SharedBus<D::Spi>> {
        self.get_handle(ResourceId::Spi2)?.as_spi()
    }

    pub fn info(&self) -> &'static str {
        self.config.info.summary
    }

    pub fn board_info(&self) -> &'static BoardInfo {
        self.config.info
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn sensor_set_power(&mut self, on: bool) -> Result<(), Error<D, P>> {
        log::debug!("sensor power {}", if on { "on" } else { "off" });
        self.sensor_power.set(on).map_err(BoardError::Gpio)
    }

    pub fn sensor_get_power(&mut self) -> bool {
        read_gate(&mut self.sensor_power, "sensor power")
    }

    pub fn screen_set_power(&mut self, on: bool) -> Result<(), Error<D, P>> {
        log::debug!("screen power {}", if on { "on" } else { "off" });
        self.screen_power.set(on).map_err(BoardError::Gpio)
    }

    pub fn screen_get_power(&mut self) -> bool {
        read_gate(&mut self.screen_power, "screen power")
    }

    pub fn led_set(&mut self, led: Led, on: bool) -> Result<(), Error<D, P>> {
        self.leds[led as usize].set(on).map_err(BoardError::Gpio)
    }

    pub fn led_get(&mut self, led: Led) -> bool {
        read_gate(&mut self.leds[led as usize], "led")
    }

    /// Tear the board down and give back the provider and pins.
    pub fn release(mut self) -> (D, BoardPins<P>) {
        if self.deinit().is_err() {
            log::warn!("release: some buses failed to deinit");
        }
        let Board { provider, sensor_power, screen_power, leds, .. } = self;
        let [led_network, led_wifi, led_bat_green, led_bat_red] = leds.map(OutputGate::release);
        let pins = BoardPins {
            sensor_power: sensor_power.release(),
            screen_power: screen_power.release(),
            led_network,
            led_wifi,
            led_bat_green,
            led_bat_red,
        };
        (provider, pins)
    }

    fn apply_gpio_defaults(&mut self) -> Result<(), P::Error> {
        for led in self.leds.iter_mut() {
            led.set(false)?;
        }
        self.sensor_power.set(self.config.sensor_power_at_init)?;
        self.screen_power.set(self.config.screen_power_at_init)
    }

    fn release_resources(&mut self) -> BusFailures<D::Error> {
        let mut failures = BusFailures::new();
        for id in ResourceId::ALL {
            let result = match self.resources.take(id) {
                Some(Resource::I2c(bus)) => self.provider.delete_i2c(bus.into_inner()),
                Some(Resource::Spi(bus)) => self.provider.delete_spi(bus.into_inner()),
                None => continue,
            };
            if let Err(error) = result {
                log::warn!("{:?} release failed", id);
                let _ = failures.push(BusFailure { resource: id, error });
            }
        }
        failures
    }
}

fn read_gate<P: StatefulOutputPin>(gate: &mut OutputGate<P>, name: &str) -> bool {
    gate.is_on().unwrap_or_else(|_| {
        log::warn!("{} readback failed", name);
        false
    })
}
