use crate::diagnostics::ErrorCode;
use embedded_hal::serial;
use ufmt::uWrite;

/// Line-oriented text output over any byte serial port
pub struct SerialConsole<S> {
    serial: S,
}

impl<S: serial::Write<u8>> SerialConsole<S> {
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), ErrorCode> {
        nb::block!(self.serial.write(byte)).map_err(|_| ErrorCode::Console)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ErrorCode> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), ErrorCode> {
        self.write_bytes(s.as_bytes())?;
        self.write_bytes(b"\r\n")
    }

    pub fn flush(&mut self) -> Result<(), ErrorCode> {
        nb::block!(self.serial.flush()).map_err(|_| ErrorCode::Console)
    }

    pub fn release(self) -> S {
        self.serial
    }
}

impl<S: serial::Write<u8>> uWrite for SerialConsole<S> {
    type Error = ErrorCode;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::serial::{Mock as SerialMock, Transaction as SerialTransaction};

    #[test]
    fn lines_end_with_crlf() {
        let expectations = [
            SerialTransaction::write_many(b"Ready\r\n"),
            SerialTransaction::write_many(b"n=42"),
            SerialTransaction::flush(),
        ];
        let mut console = SerialConsole::new(SerialMock::new(&expectations));

        console.write_line("Ready").unwrap();
        ufmt::uwrite!(&mut console, "n={}", 42u32).unwrap();
        console.flush().unwrap();

        console.release().done();
    }
}
