use avr_device::atmega2560::{PORTB, PORTH};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Debug)]
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                // Set DDRx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::new()
            }

            pub fn into_pull_up_input(self) -> Pin<$PORT, P, Input> {
                // Clear DDRx bit, set PORTx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::new()
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Ok(())
            }
        }

        impl<const P: u8> InputPin for Pin<$PORT, P, Input> {
            type Error = Infallible;

            #[inline]
            fn is_high(&self) -> Result<bool, Infallible> {
                Ok(unsafe { (*$PORT::ptr()).$pin.read().bits() } & (1 << P) != 0)
            }

            #[inline]
            fn is_low(&self) -> Result<bool, Infallible> {
                self.is_high().map(|high| !high)
            }
        }
    };
}

impl_port!(PORTB, pinb, ddrb, portb);
impl_port!(PORTH, pinh, ddrh, porth);

// Arduino Mega 2560 header wiring
pub mod board {
    use super::*;

    /// D7, active low with the internal pull-up
    pub type ButtonPin = Pin<PORTH, 4, Input>;
    /// D8
    pub type GreenLed = Pin<PORTH, 5, Output>;
    /// D9
    pub type RedLed = Pin<PORTH, 6, Output>;
    /// D10
    pub type YellowLed = Pin<PORTB, 4, Output>;

    pub struct Pins {
        pub button: ButtonPin,
        pub green: GreenLed,
        pub red: RedLed,
        pub yellow: YellowLed,
    }

    impl Pins {
        /// Configure the monitor's pins. Taking the ports keeps anyone else
        /// from reconfiguring them.
        pub fn new(_portb: PORTB, _porth: PORTH) -> Self {
            Self {
                button: Pin::<PORTH, 4, Input>::new().into_pull_up_input(),
                green: Pin::<PORTH, 5, Input>::new().into_output(),
                red: Pin::<PORTH, 6, Input>::new().into_output(),
                yellow: Pin::<PORTB, 4, Input>::new().into_output(),
            }
        }
    }
}
