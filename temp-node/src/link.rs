//! The radio and sensor seams of the node.

use core::fmt::Debug;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use embedded_hal_async::spi::SpiBus;
use lr11xx_hal_async::busy::Clock;
use lr11xx_hal_async::{HalError, Lr11xx};
use tmp117_async::{Tmp117, Tmp117Error};

/// A radio able to carry telemetry frames.
#[allow(async_fn_in_trait)]
pub trait RadioLink {
    /// Error reported by the radio transport.
    type Error: Debug;

    /// Forces the radio into a known state.
    async fn reset(&mut self) -> Result<(), Self::Error>;

    /// Rouses the radio from sleep.
    async fn wake(&mut self) -> Result<(), Self::Error>;

    /// Sends `opcode` followed by `payload` as one frame.
    async fn send(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error>;
}

/// A source of temperature readings.
#[allow(async_fn_in_trait)]
pub trait TemperatureSource {
    /// Error reported by the sensor.
    type Error: Debug;

    /// Verifies the sensor is present and of the expected kind.
    async fn probe(&mut self) -> Result<(), Self::Error>;

    /// Reads the current temperature in degrees Celsius.
    async fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}

impl<TSPI, TNSS, TBUSY, TNRST, TALERT, D, TSPIERR, TPINERR> RadioLink
    for Lr11xx<TSPI, TNSS, TBUSY, TNRST, TALERT, D>
where
    TSPI: SpiBus<u8, Error = TSPIERR>,
    TNSS: OutputPin<Error = TPINERR>,
    TBUSY: InputPin<Error = TPINERR>,
    TNRST: OutputPin<Error = TPINERR>,
    TALERT: InputPin<Error = TPINERR>,
    D: DelayNs + Clock,
    TSPIERR: Debug,
    TPINERR: Debug,
{
    type Error = HalError<TSPIERR, TPINERR>;

    async fn reset(&mut self) -> Result<(), Self::Error> {
        Lr11xx::reset(self).await
    }

    async fn wake(&mut self) -> Result<(), Self::Error> {
        Lr11xx::wake(self).await
    }

    async fn send(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        self.write(&[opcode], payload).await
    }
}

impl<I2cType, ErrorType> TemperatureSource for Tmp117<I2cType>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
    ErrorType: embedded_hal_async::i2c::Error,
{
    type Error = Tmp117Error<ErrorType>;

    async fn probe(&mut self) -> Result<(), Self::Error> {
        Tmp117::probe(self).await
    }

    async fn read_celsius(&mut self) -> Result<f32, Self::Error> {
        self.read_temperature().await
    }
}
