//! A battery-powered temperature node.
//!
//! The node samples a TMP117 over I2C, encodes the reading as a two-byte payload in
//! hundredths of a degree, and hands it to an LR11xx radio over SPI. How long it sleeps
//! before the next sample depends on the reading: the hotter it gets, the sooner it
//! reports again.
//!
//! The peripherals are reached through the [`RadioLink`] and [`TemperatureSource`]
//! traits, implemented here for [`lr11xx_hal_async::Lr11xx`] and
//! [`tmp117_async::Tmp117`].

#![cfg_attr(not(test), no_std)]

pub mod cadence;
pub mod config;
pub mod link;
pub mod node;
pub mod telemetry;

pub use cadence::Tier;
pub use config::{ConfigError, NodeConfig, TELEMETRY_OPCODE};
pub use link::{RadioLink, TemperatureSource};
pub use node::{CycleOutcome, CycleReport, StartError, TelemetryNode};
pub use telemetry::TelemetryPayload;
