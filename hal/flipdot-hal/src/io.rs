//! Adapter from `embedded-io` byte streams
//!
//! Most chip HALs (and host serial crates via `embedded-io-adapters`)
//! expose their UARTs as `embedded_io` streams. [`IoUart`] lets any such
//! stream act as a sign transport.
//!
//! A stream that reports data ready but then reads nothing has hit end of
//! file; that surfaces as [`ReadExactError::UnexpectedEof`] rather than
//! being retried.

use embedded_io::{Read, ReadExactError, ReadReady, Write};

use crate::uart::{UartRx, UartTx};

/// UART transport over an `embedded-io` stream
pub struct IoUart<T> {
    io: T,
}

impl<T> IoUart<T> {
    /// Wrap a stream
    pub fn new(io: T) -> Self {
        Self { io }
    }

    /// Borrow the wrapped stream
    pub fn inner(&mut self) -> &mut T {
        &mut self.io
    }

    /// Release the wrapped stream
    pub fn into_inner(self) -> T {
        self.io
    }
}

impl<T: Write> UartTx for IoUart<T> {
    type Error = ReadExactError<T::Error>;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.io.write_all(data).map_err(ReadExactError::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.io.flush().map_err(ReadExactError::Other)
    }
}

impl<T: Read + ReadReady> UartRx for IoUart<T> {
    type Error = ReadExactError<T::Error>;

    // `ReadReady` only answers "is anything there", so report one byte
    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        let ready = self.io.read_ready().map_err(ReadExactError::Other)?;
        Ok(usize::from(ready))
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.io.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}
