use crate::diagnostics::ErrorCode;
use embedded_hal::digital::v2::OutputPin;

/// Single indicator LED. Remembers the level last driven.
pub struct Led<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Led<P> {
    pub fn new(pin: P) -> Self {
        Led { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ErrorCode> {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ErrorCode::OutputPin)?;
        self.on = on;
        Ok(())
    }

    pub fn on(&mut self) -> Result<(), ErrorCode> {
        self.set(true)
    }

    pub fn off(&mut self) -> Result<(), ErrorCode> {
        self.set(false)
    }

    pub fn toggle(&mut self) -> Result<(), ErrorCode> {
        self.set(!self.on)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

    #[test]
    fn drives_pin_and_tracks_level() {
        let expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut led = Led::new(PinMock::new(&expectations));

        led.on().unwrap();
        assert!(led.is_on());
        led.toggle().unwrap();
        assert!(!led.is_on());
        led.set(true).unwrap();
        assert!(led.is_on());

        led.release().done();
    }
}
