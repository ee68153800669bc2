//! ATmega2560 peripherals for the Arduino Mega 2560

pub mod gpio;
pub mod power;
pub mod timer;
pub mod uart;

pub use gpio::board;
pub use gpio::{Input, Output, Pin};
pub use power::{Power, SleepMode};
pub use timer::MillisClock;
pub use uart::Uart;

use avr_device::atmega2560;

use crate::application::{Board, Peripherals};
use crate::config::UART_BAUD;
use crate::drivers::{Button, Led, SerialConsole};

pub struct Mega2560;

impl Board for Mega2560 {
    type Clock = MillisClock;
    type Button = board::ButtonPin;
    type ShortLed = board::GreenLed;
    type LongLed = board::RedLed;
    type ActivityLed = board::YellowLed;
    type Serial = Uart;
}

impl Mega2560 {
    /// Bring up Timer0, the pins and USART0.
    pub fn peripherals(dp: atmega2560::Peripherals) -> Peripherals<Self> {
        let pins = board::Pins::new(dp.PORTB, dp.PORTH);
        Peripherals {
            clock: MillisClock::start(dp.TC0),
            button: Button::active_low(pins.button),
            short_led: Led::new(pins.green),
            long_led: Led::new(pins.red),
            activity_led: Led::new(pins.yellow),
            console: SerialConsole::new(Uart::new(dp.USART0, UART_BAUD)),
        }
    }
}
