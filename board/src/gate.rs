use embedded_hal::digital::{PinState, StatefulOutputPin};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    fn level(self, on: bool) -> PinState {
        match self {
            Polarity::ActiveHigh => PinState::from(on),
            Polarity::ActiveLow => PinState::from(!on),
        }
    }
}

/// Digital output with a logical on/off state, e.g. a power enable or an LED.
///
/// `is_on` reports the level the MCU is driving, not whether the load is
/// actually powered.
pub struct OutputGate<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: StatefulOutputPin> OutputGate<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        self.pin.set_state(self.polarity.level(on))
    }

    pub fn is_on(&mut self) -> Result<bool, P::Error> {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.is_set_high(),
            Polarity::ActiveLow => self.pin.is_set_low(),
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

/// Status LEDs on the front panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Led {
    Network,
    Wifi,
    BatteryGreen,
    BatteryRed,
}

impl Led {
    pub const ALL: [Led; 4] = [Led::Network, Led::Wifi, Led::BatteryGreen, Led::BatteryRed];

    pub fn polarity(self) -> Polarity {
        match self {
            Led::Wifi => Polarity::ActiveLow,
            _ => Polarity::ActiveHigh,
        }
    }
}
