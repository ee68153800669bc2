use crate::diagnostics::ErrorCode;
use embedded_hal::digital::v2::InputPin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    Low,
    High,
}

/// Raw (undebounced) push button
pub struct Button<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> Button<P> {
    /// Button to ground with a pull-up, the usual wiring
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active: ActiveLevel::Low,
        }
    }

    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active: ActiveLevel::High,
        }
    }

    pub fn is_pressed(&self) -> Result<bool, ErrorCode> {
        let result = match self.active {
            ActiveLevel::Low => self.pin.is_low(),
            ActiveLevel::High => self.pin.is_high(),
        };
        result.map_err(|_| ErrorCode::InputPin)
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active
    }

    pub fn release(self) -> P {
        self.pin
    }
}
