//! Chip-select framed SPI transactions.
//!
//! A transaction asserts NSS, runs a list of [`Operation`]s on the bus, flushes, and
//! deasserts NSS. NSS is released on every path, so a failed transfer never leaves the
//! radio selected.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::Operation;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use crate::hal::err::{HalError, PinError, SpiError};

/// Performs one chip-select window against the device.
///
/// Operations run in order and stop at the first failure. The bus is flushed and NSS
/// deasserted regardless of the outcome; the first error encountered is returned.
pub async fn transaction<BUS, CS, D>(
    operations: &mut [Operation<'_, u8>],
    bus: &mut BUS,
    delay: &mut D,
    cs: &mut CS,
) -> Result<(), HalError<BUS::Error, CS::Error>>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
{
    cs.set_low().map_err(PinError::Output)?;

    let mut op_res = Ok(());
    for op in operations {
        if let Err(err) = process_op(bus, delay, op).await {
            log::warn!("lr11xx::bus operation failed, releasing NSS");
            op_res = Err(err);
            break;
        }
    }

    // On failure, it's important to still flush and deassert CS.
    let flush_res = bus.flush().await.map_err(SpiError::Flush);
    let cs_res = cs.set_high().map_err(PinError::Output);

    op_res?;
    flush_res?;
    cs_res?;

    Ok(())
}

/// Processes a single SPI operation.
async fn process_op<BUS, D>(
    bus: &mut BUS,
    delay: &mut D,
    op: &mut Operation<'_, u8>,
) -> Result<(), SpiError<BUS::Error>>
where
    BUS: SpiBus<u8>,
    D: DelayNs,
{
    match op {
        Operation::Read(buf) => bus.read(buf).await.map_err(SpiError::Read),
        Operation::Write(buf) => bus.write(buf).await.map_err(SpiError::Write),
        Operation::Transfer(read, write) => {
            bus.transfer(read, write).await.map_err(SpiError::Transfer)
        }
        Operation::TransferInPlace(buf) => {
            bus.transfer_in_place(buf).await.map_err(SpiError::Transfer)
        }
        Operation::DelayNs(ns) => {
            bus.flush().await.map_err(SpiError::Flush)?;
            delay.delay_ns(*ns).await;
            Ok(())
        }
    }
}
