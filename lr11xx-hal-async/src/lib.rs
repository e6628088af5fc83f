//! An asynchronous, `no_std` transport HAL for the Semtech LR11xx family of LoRa transceivers.
//!
//! The LR11xx is driven over a half-duplex command/response channel built from an SPI bus
//! and three control lines: chip-select (NSS, active low), BUSY (high while the radio is
//! not ready for a new transaction) and NRESET (active low). This crate implements the
//! handshake that turns those lines into reliable primitives:
//!
//! * [`Lr11xx::reset`] and [`Lr11xx::wake`] bring the radio to a known, awake state.
//! * [`Lr11xx::write`] sends a command and its payload in one chip-select window.
//! * [`Lr11xx::read`] sends a command, waits for the radio to prepare its answer, and
//!   clocks the response out in a second window.
//! * [`Lr11xx::direct_read`] clocks out bytes the radio has already queued.
//!
//! Every bus operation is gated on the BUSY line by a bounded poll ([`busy`]), so a radio
//! that never becomes ready surfaces as [`HalError::BusyTimeout`] instead of a hang.
//!
//! Command encoding is left to the caller: this crate treats command frames as opaque
//! bytes.

#![no_std]

pub mod bus;
pub mod busy;
pub mod conf;

mod hal;
pub use hal::*;
