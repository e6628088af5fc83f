//! Error types for the LR11xx transport.

use core::fmt::{self, Debug};

use crate::busy::BusyError;

/// An error related to SPI communication.
pub enum SpiError<TSPIERR> {
    /// An error occurred during a `write` operation.
    Write(TSPIERR),
    /// An error occurred during a `read` operation.
    Read(TSPIERR),
    /// An error occurred during a `transfer` operation.
    Transfer(TSPIERR),
    /// An error occurred while flushing the bus.
    Flush(TSPIERR),
}

impl<TSPIERR: Debug> Debug for SpiError<TSPIERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(err) => write!(f, "Write({err:?})"),
            Self::Read(err) => write!(f, "Read({err:?})"),
            Self::Transfer(err) => write!(f, "Transfer({err:?})"),
            Self::Flush(err) => write!(f, "Flush({err:?})"),
        }
    }
}

/// An error related to GPIO pin operations.
pub enum PinError<TPINERR> {
    /// An error occurred on an output pin.
    Output(TPINERR),
    /// An error occurred on an input pin.
    Input(TPINERR),
}

impl<TPINERR: Debug> Debug for PinError<TPINERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(err) => write!(f, "Output({err:?})"),
            Self::Input(err) => write!(f, "Input({err:?})"),
        }
    }
}

/// The main error type for the LR11xx transport.
pub enum HalError<TSPIERR, TPINERR> {
    /// The radio kept BUSY high past the configured timeout.
    BusyTimeout {
        /// Time spent polling, in microseconds.
        waited_us: u32,
    },
    /// An SPI-related error.
    Spi(SpiError<TSPIERR>),
    /// A pin-related error.
    Pin(PinError<TPINERR>),
    /// A command frame must carry at least the opcode byte.
    EmptyCommand,
}

impl<TSPIERR: Debug, TPINERR: Debug> Debug for HalError<TSPIERR, TPINERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusyTimeout { waited_us } => write!(f, "BusyTimeout({waited_us}us)"),
            Self::Spi(err) => write!(f, "Spi({err:?})"),
            Self::Pin(err) => write!(f, "Pin({err:?})"),
            Self::EmptyCommand => write!(f, "EmptyCommand"),
        }
    }
}

impl<TSPIERR, TPINERR> From<SpiError<TSPIERR>> for HalError<TSPIERR, TPINERR> {
    fn from(spi_err: SpiError<TSPIERR>) -> Self {
        HalError::Spi(spi_err)
    }
}

impl<TSPIERR, TPINERR> From<PinError<TPINERR>> for HalError<TSPIERR, TPINERR> {
    fn from(pin_err: PinError<TPINERR>) -> Self {
        HalError::Pin(pin_err)
    }
}

impl<TSPIERR, TPINERR> From<BusyError<TPINERR>> for HalError<TSPIERR, TPINERR> {
    fn from(busy_err: BusyError<TPINERR>) -> Self {
        match busy_err {
            BusyError::Timeout { waited_us } => HalError::BusyTimeout { waited_us },
            BusyError::Pin(err) => HalError::Pin(PinError::Input(err)),
        }
    }
}
