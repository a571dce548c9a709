//! UART serial communication abstractions
//!
//! The sign only ever receives: drivers write whole lines and throw away
//! anything the sign sends back. The receive side therefore only needs to
//! report and consume pending bytes.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until every queued byte has physically left the transmitter
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Number of received bytes that can be read without blocking
    ///
    /// Implementations that can only tell whether *some* data is pending
    /// may report `1` for "at least one byte".
    fn bytes_available(&mut self) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read and drop every pending byte
    ///
    /// Returns the number of bytes discarded.
    fn discard_pending(&mut self) -> Result<usize, Self::Error> {
        let mut discarded = 0;
        while self.bytes_available()? > 0 {
            self.read_byte()?;
            discarded += 1;
        }
        Ok(discarded)
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral, reporting
/// failures through one error type.
pub trait Uart: UartTx + UartRx<Error = <Self as UartTx>::Error> {}

// Blanket implementation
impl<T> Uart for T where T: UartTx + UartRx<Error = <T as UartTx>::Error> {}

/// Error type of a combined [`Uart`]
pub type UartError<U> = <U as UartTx>::Error;

/// UART configuration
///
/// Luminator signs listen on an RS-485 bus with 8N1 framing; only the
/// baud rate varies between installations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 framing at the given baud rate
    pub const fn new(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
