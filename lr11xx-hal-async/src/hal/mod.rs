//! The core implementation of the LR11xx transport.

pub(crate) mod err;

use embedded_hal::digital::InputPin;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::Operation;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use crate::busy::{self, Clock};
use crate::bus;
use crate::conf::TransportConfig;

pub use self::err::{HalError, PinError, SpiError};

type Pins<TNSS, TBUSY, TNRST, TALERT> = (TNSS, TBUSY, TNRST, TALERT);

/// A Semtech LR11xx transceiver attached to an SPI bus and its control lines.
///
/// One value exists per physical radio. The bus and line handles are fixed at construction;
/// operations take `&mut self`, so two callers can never interleave chip-select windows on
/// the same radio.
pub struct Lr11xx<TSPI, TNSS, TBUSY, TNRST, TALERT, D> {
    spi: TSPI,
    nss_pin: TNSS,
    busy_pin: TBUSY,
    nrst_pin: TNRST,
    alert_pin: TALERT,
    delay: D,
    conf: TransportConfig,
}

impl<TSPI, TNSS, TBUSY, TNRST, TALERT, D, TSPIERR, TPINERR>
    Lr11xx<TSPI, TNSS, TBUSY, TNRST, TALERT, D>
where
    TSPI: SpiBus<u8, Error = TSPIERR>,
    TNSS: OutputPin<Error = TPINERR>,
    TBUSY: InputPin<Error = TPINERR>,
    TNRST: OutputPin<Error = TPINERR>,
    TALERT: InputPin<Error = TPINERR>,
    D: DelayNs + Clock,
{
    /// Creates a new `Lr11xx` transport.
    ///
    /// # Arguments
    ///
    /// * `spi` - An asynchronous SPI bus, MSB first, in the radio's documented mode.
    /// * `pins` - A tuple containing the control lines: (NSS, BUSY, NRESET, ALERT).
    ///   NSS and NRESET are expected to idle high.
    /// * `delay` - A delay provider for the reset/wake pulses and BUSY polling. It is also
    ///   the clock the BUSY timeout is measured on.
    /// * `conf` - Transport timing parameters.
    pub fn new(
        spi: TSPI,
        pins: Pins<TNSS, TBUSY, TNRST, TALERT>,
        delay: D,
        conf: TransportConfig,
    ) -> Self {
        let (nss_pin, busy_pin, nrst_pin, alert_pin) = pins;
        Self {
            spi,
            nss_pin,
            busy_pin,
            nrst_pin,
            alert_pin,
            delay,
            conf,
        }
    }

    /// Resets the radio by pulsing NRESET low.
    ///
    /// The BUSY line is not consulted: the radio is not driving it meaningfully yet.
    pub async fn reset(&mut self) -> Result<(), HalError<TSPIERR, TPINERR>> {
        log::trace!("lr11xx::reset hold {}ms", self.conf.reset_hold_ms);
        self.nrst_pin.set_low().map_err(PinError::Output)?;
        self.delay.delay_ms(self.conf.reset_hold_ms).await;
        self.nrst_pin.set_high().map_err(PinError::Output)?;
        Ok(())
    }

    /// Wakes the radio from sleep by pulsing NSS low without clocking any data.
    ///
    /// The BUSY line is not consulted: a sleeping radio holds it high until woken.
    pub async fn wake(&mut self) -> Result<(), HalError<TSPIERR, TPINERR>> {
        log::trace!("lr11xx::wake pulse {}ms", self.conf.wake_pulse_ms);
        let pulse_ns = self.conf.wake_pulse_ms.saturating_mul(1_000_000);
        self.transaction(&mut [Operation::DelayNs(pulse_ns)]).await
    }

    /// Writes a command followed by an optional payload.
    ///
    /// Command and payload go out back to back in a single chip-select window, so the
    /// radio sees them as one frame.
    pub async fn write(
        &mut self,
        command: &[u8],
        payload: &[u8],
    ) -> Result<(), HalError<TSPIERR, TPINERR>> {
        if command.is_empty() {
            return Err(HalError::EmptyCommand);
        }
        log::trace!("lr11xx::write cmd: {command:02x?}, payload: {payload:02x?}");

        self.wait_on_busy().await?;
        if payload.is_empty() {
            self.transaction(&mut [Operation::Write(command)]).await
        } else {
            self.transaction(&mut [Operation::Write(command), Operation::Write(payload)])
                .await
        }
    }

    /// Sends a command and reads its response into `response`.
    ///
    /// This takes two chip-select windows: the command is written and NSS released, then
    /// BUSY is awaited again while the radio prepares the answer, and finally
    /// `response.len()` bytes are clocked out while the filler byte is sent.
    pub async fn read(
        &mut self,
        command: &[u8],
        response: &mut [u8],
    ) -> Result<(), HalError<TSPIERR, TPINERR>> {
        if command.is_empty() {
            return Err(HalError::EmptyCommand);
        }
        log::trace!("lr11xx::read cmd: {command:02x?}, len: {}", response.len());

        self.wait_on_busy().await?;
        self.transaction(&mut [Operation::Write(command)]).await?;

        self.wait_on_busy().await?;
        response.fill(self.conf.filler_byte);
        self.transaction(&mut [Operation::TransferInPlace(&mut *response)])
            .await?;

        log::trace!("lr11xx::read response: {response:02x?}");
        Ok(())
    }

    /// Reads `response.len()` bytes the radio has already queued, without a command phase.
    pub async fn direct_read(
        &mut self,
        response: &mut [u8],
    ) -> Result<(), HalError<TSPIERR, TPINERR>> {
        self.wait_on_busy().await?;
        self.transaction(&mut [Operation::Read(&mut *response)])
            .await?;

        log::trace!("lr11xx::direct_read response: {response:02x?}");
        Ok(())
    }

    /// Checks if the radio's BUSY pin is high.
    pub fn is_busy(&mut self) -> bool {
        self.busy_pin.is_high().unwrap_or(true)
    }

    /// Checks if the radio's ALERT (IRQ) pin is high.
    pub fn is_alert_high(&mut self) -> bool {
        self.alert_pin.is_high().unwrap_or(false)
    }

    /// Waits until the BUSY pin goes low, bounded by the configured timeout.
    pub async fn wait_on_busy(&mut self) -> Result<(), HalError<TSPIERR, TPINERR>> {
        busy::wait_on_busy(&mut self.busy_pin, &mut self.delay, &self.conf).await?;
        Ok(())
    }

    async fn transaction(
        &mut self,
        operations: &mut [Operation<'_, u8>],
    ) -> Result<(), HalError<TSPIERR, TPINERR>> {
        bus::transaction(operations, &mut self.spi, &mut self.delay, &mut self.nss_pin).await
    }
}
