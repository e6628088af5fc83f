//! An asynchronous, `no_std` driver for the TI TMP117 digital temperature sensor.
//!
//! The TMP117 reports temperature as a big-endian, two's complement 16-bit value with a
//! resolution of 1/128 °C (7.8125 m°C) in its temperature register.
//!
//! # Usage
//!
//! Any I2C peripheral implementing `embedded_hal_async::i2c::I2c` will do.
//!
//! ```no_run
//! # async fn demo<I: embedded_hal_async::i2c::I2c>(i2c: I) {
//! use tmp117_async::Tmp117;
//!
//! let mut sensor = Tmp117::new(i2c);
//! if sensor.probe().await.is_ok() {
//!     if let Ok(celsius) = sensor.read_temperature().await {
//!         log::info!("Temperature: {celsius} C");
//!     }
//! }
//! # }
//! ```

#![cfg_attr(not(test), no_std)]

use core::fmt::{self, Debug};

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

// --- Addresses ---
/// Address with ADD0 tied to GND.
pub const DEFAULT_ADDRESS: u8 = 0x48;

// --- Register Addresses ---
const TEMP_RESULT_REG: u8 = 0x00;
const DEVICE_ID_REG: u8 = 0x0F;

// --- Device ID ---
const DEVICE_ID_MASK: u16 = 0x0FFF;
const DEVICE_ID: u16 = 0x0117;

/// Degrees Celsius per LSB of the temperature register.
pub const RESOLUTION_CELSIUS: f32 = 0.0078125;

/// Errors returned by the TMP117 driver.
pub enum Tmp117Error<E> {
    /// The I2C transaction failed.
    I2c(E),
    /// The device ID register did not identify a TMP117.
    UnexpectedDeviceId(u16),
}

impl<E: Debug> Debug for Tmp117Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(err) => write!(f, "I2c({err:?})"),
            Self::UnexpectedDeviceId(id) => write!(f, "UnexpectedDeviceId({id:#06x})"),
        }
    }
}

/// Converts a raw temperature register value to degrees Celsius.
pub fn raw_to_celsius(raw: i16) -> f32 {
    raw as f32 * RESOLUTION_CELSIUS
}

/// A TMP117 on an I2C bus.
pub struct Tmp117<I2cType> {
    i2c: I2cType,
    address: u8,
}

impl<I2cType, ErrorType> Tmp117<I2cType>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
    ErrorType: embedded_hal_async::i2c::Error,
{
    /// Creates a driver for a TMP117 at [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2cType) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a driver for a TMP117 at a specific 7-bit address (0x48..=0x4B).
    pub fn with_address(i2c: I2cType, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Reads the current temperature in degrees Celsius.
    pub async fn read_temperature(&mut self) -> Result<f32, Tmp117Error<ErrorType>> {
        let raw = i16::from_be_bytes(self.read_register(TEMP_RESULT_REG).await?);
        let celsius = raw_to_celsius(raw);
        log::trace!("tmp117::read_temperature raw: {raw:#06x}, {celsius} C");
        Ok(celsius)
    }

    /// Reads the device ID register.
    pub async fn read_device_id(&mut self) -> Result<u16, Tmp117Error<ErrorType>> {
        Ok(u16::from_be_bytes(self.read_register(DEVICE_ID_REG).await?))
    }

    /// Checks that the device answering at this address is a TMP117.
    pub async fn probe(&mut self) -> Result<(), Tmp117Error<ErrorType>> {
        let id = self.read_device_id().await?;
        if id & DEVICE_ID_MASK != DEVICE_ID {
            log::error!("tmp117::probe unexpected device id {id:#06x}");
            return Err(Tmp117Error::UnexpectedDeviceId(id));
        }
        log::debug!("tmp117::probe found TMP117 rev {}", id >> 12);
        Ok(())
    }

    async fn read_register(&mut self, reg: u8) -> Result<[u8; 2], Tmp117Error<ErrorType>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Tmp117Error::I2c)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_register_scales_to_celsius() {
        assert_eq!(raw_to_celsius(i16::from_be_bytes([0x0C, 0x80])), 25.0);
        assert_eq!(raw_to_celsius(0), 0.0);
        assert_eq!(raw_to_celsius(1), 0.0078125);
        assert_eq!(raw_to_celsius(-128), -1.0);
        assert_eq!(raw_to_celsius(i16::from_be_bytes([0xFF, 0x80])), -1.0);
    }
}
