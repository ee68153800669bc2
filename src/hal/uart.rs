use avr_device::atmega2560::USART0;
use core::convert::Infallible;
use embedded_hal::serial;

use crate::config::CPU_FREQ_HZ;

// UCSR0A
const UDRE0: u8 = 1 << 5;
// UCSR0B
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, no parity, 1 stop bit, 8 data bits
const FRAME_8N1: u8 = 0b0000_0110;

/// UBRR for normal-speed asynchronous mode, 103 for 9600 baud at 16 MHz
pub const fn ubrr_for(baud: u32) -> u16 {
    (CPU_FREQ_HZ / (16 * baud) - 1) as u16
}

/// Polled, transmit-only USART0
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0, baud: u32) -> Self {
        unsafe {
            usart.ubrr0.write(|w| w.bits(ubrr_for(baud)));
            usart.ucsr0c.write(|w| w.bits(FRAME_8N1));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }

    #[inline]
    fn data_register_empty(&self) -> bool {
        self.usart.ucsr0a.read().bits() & UDRE0 != 0
    }

    pub fn release(self) -> USART0 {
        self.usart
    }
}

impl serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        if !self.data_register_empty() {
            return Err(nb::Error::WouldBlock);
        }
        unsafe {
            self.usart.udr0.write(|w| w.bits(word));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.data_register_empty() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
