use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use hts221::{Hts221, Hts221Reading, HTS221_ADDRESS, HTS221_ID};
use iot_board::{Board, BoardError, BoardPins, BusProvider, I2cConfig, ResourceId, SpiConfig, MESHKIT_SENSE};

/// Hands out one pre-scripted I2C mock and keeps it once the board lets go.
struct MockBuses {
    i2c: Option<I2cMock>,
    released: Option<I2cMock>,
}

impl BusProvider for MockBuses {
    type I2c = I2cMock;
    type Spi = ();
    type Error = &'static str;

    fn create_i2c(&mut self, config: &I2cConfig) -> Result<I2cMock, Self::Error> {
        assert_eq!(config.clock_hz, 100_000);
        assert!(config.scl_pullup && config.sda_pullup);
        self.i2c.take().ok_or("i2c0 already claimed")
    }

    fn delete_i2c(&mut self, bus: I2cMock) -> Result<(), Self::Error> {
        self.released = Some(bus);
        Ok(())
    }

    fn create_spi(&mut self, _config: &SpiConfig) -> Result<(), Self::Error> {
        Err("spi2 is not routed")
    }

    fn delete_spi(&mut self, _bus: ()) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn pin(states: &[State]) -> PinMock {
    let expectations: Vec<PinTransaction> = states.iter().map(|s| PinTransaction::set(s.clone())).collect();
    PinMock::new(&expectations)
}

fn done(mut pins: BoardPins<PinMock>) {
    pins.sensor_power.done();
    pins.screen_power.done();
    pins.led_network.done();
    pins.led_wifi.done();
    pins.led_bat_green.done();
    pins.led_bat_red.done();
}

#[tokio::test]
async fn hts221_reads_through_i2c0_handle() {
    let calibration = [
        40u8, 160, 0xa0, 0x40, 0x00, 0x04, 0x00, 0x00,
        0x00, 0x00, 0x70, 0x17, 0x00, 0x00, 0xe8, 0x03,
    ];
    let expectations = [
        I2cTransaction::write_read(HTS221_ADDRESS, vec![0x0f], vec![HTS221_ID]),
        I2cTransaction::write(HTS221_ADDRESS, vec![0x20, 0x85]),
        I2cTransaction::write_read(HTS221_ADDRESS, vec![0xb0], calibration.to_vec()),
        I2cTransaction::write_read(HTS221_ADDRESS, vec![0xa8], vec![0xb8, 0x0b, 0xf4, 0x01]),
    ];
    let provider = MockBuses { i2c: Some(I2cMock::new(&expectations)), released: None };

    // init drives rails and LEDs, release switches both rails off
    let sensor_power = [
        PinTransaction::set(State::Low),
        PinTransaction::get_state(State::Low),
        PinTransaction::set(State::High),
    ];
    let pins = BoardPins {
        sensor_power: PinMock::new(&sensor_power),
        screen_power: pin(&[State::High, State::High]),
        led_network: pin(&[State::Low]),
        led_wifi: pin(&[State::High]),
        led_bat_green: pin(&[State::Low]),
        led_bat_red: pin(&[State::Low]),
    };

    let mut board = Board::new(MESHKIT_SENSE, provider, pins);
    board.init().unwrap();
    assert!(board.sensor_get_power());
    assert!(board.get_handle(ResourceId::Spi2).is_none());

    {
        let bus = board.i2c0().unwrap();
        let mut i2c = bus.lock().await;
        let mut sensor = Hts221::new(&mut *i2c);
        sensor.init().await.unwrap();
        assert_eq!(sensor.read().await.unwrap(), Hts221Reading::new(500, 300));
    }

    let (mut provider, pins) = board.release();
    assert!(provider.i2c.is_none());
    provider.released.take().unwrap().done();
    done(pins);
}

#[test]
fn unrouted_spi_fails_init_and_returns_i2c0() {
    let no_traffic: [I2cTransaction; 0] = [];
    let provider = MockBuses { i2c: Some(I2cMock::new(&no_traffic)), released: None };
    let pins = BoardPins {
        sensor_power: pin(&[State::Low, State::High]),
        screen_power: pin(&[State::High, State::High]),
        led_network: pin(&[State::Low]),
        led_wifi: pin(&[State::High]),
        led_bat_green: pin(&[State::Low]),
        led_bat_red: pin(&[State::Low]),
    };
    let config = iot_board::BoardConfig {
        spi2: Some(SpiConfig { host: 2, mosi: 23, miso: None, sclk: 22, clock_hz: 4_000_000 }),
        ..MESHKIT_SENSE
    };

    let mut board = Board::new(config, provider, pins);
    match board.init() {
        Err(BoardError::HardwareInit(failures)) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].resource, ResourceId::Spi2);
            assert_eq!(failures[0].error, "spi2 is not routed");
        }
        _ => panic!("expected an init failure"),
    }
    assert!(!board.is_init());
    assert!(board.i2c0().is_none());

    let (mut provider, pins) = board.release();
    // rolled back during the failed init
    provider.released.take().unwrap().done();
    done(pins);
}
