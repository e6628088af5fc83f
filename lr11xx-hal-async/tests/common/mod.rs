//! Recording mocks for the LR11xx transport tests.
//!
//! Every line transition, bus operation and delay is appended to a shared event log so
//! tests can assert on the exact sequence the transport produced.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::Instant;
use embedded_hal::digital::{self, ErrorKind as PinErrorKind};
use embedded_hal::spi::{self, ErrorKind as SpiErrorKind};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use lr11xx_hal_async::busy::Clock;
use lr11xx_hal_async::conf::TransportConfig;
use lr11xx_hal_async::Lr11xx;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NssLow,
    NssHigh,
    ResetLow,
    ResetHigh,
    BusySample(bool),
    Write(Vec<u8>),
    Read(usize),
    /// Bytes clocked out during a full-duplex transfer.
    Transfer(Vec<u8>),
    Flush,
    DelayNs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn events(log: &Log) -> Vec<Event> {
    log.borrow().clone()
}

pub fn count(log: &Log, event: &Event) -> usize {
    log.borrow().iter().filter(|e| *e == event).count()
}

pub fn busy_samples(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|e| matches!(e, Event::BusySample(_)))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    Never,
    Write,
    Read,
    Transfer,
}

pub struct MockSpi {
    log: Log,
    responses: VecDeque<u8>,
    fail: Fail,
}

impl MockSpi {
    fn next_response(&mut self) -> u8 {
        self.responses.pop_front().unwrap_or(0xFF)
    }
}

impl spi::ErrorType for MockSpi {
    type Error = SpiErrorKind;
}

impl SpiBus<u8> for MockSpi {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Read(words.len()));
        if self.fail == Fail::Read {
            return Err(SpiErrorKind::Other);
        }
        for w in words.iter_mut() {
            *w = self.next_response();
        }
        Ok(())
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        if self.fail == Fail::Write {
            return Err(SpiErrorKind::Other);
        }
        Ok(())
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Transfer(write.to_vec()));
        if self.fail == Fail::Transfer {
            return Err(SpiErrorKind::Other);
        }
        for r in read.iter_mut() {
            *r = self.next_response();
        }
        Ok(())
    }

    async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Transfer(words.to_vec()));
        if self.fail == Fail::Transfer {
            return Err(SpiErrorKind::Other);
        }
        for w in words.iter_mut() {
            *w = self.next_response();
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum OutputRole {
    Nss,
    Reset,
}

pub struct MockOutput {
    log: Log,
    role: OutputRole,
}

impl digital::ErrorType for MockOutput {
    type Error = PinErrorKind;
}

impl digital::OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let event = match self.role {
            OutputRole::Nss => Event::NssLow,
            OutputRole::Reset => Event::ResetLow,
        };
        self.log.borrow_mut().push(event);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let event = match self.role {
            OutputRole::Nss => Event::NssHigh,
            OutputRole::Reset => Event::ResetHigh,
        };
        self.log.borrow_mut().push(event);
        Ok(())
    }
}

/// An input line that replays scripted levels, then settles on `idle`.
pub struct MockInput {
    log: Option<Log>,
    levels: VecDeque<bool>,
    idle: bool,
    fail: bool,
}

impl MockInput {
    fn sample(&mut self) -> Result<bool, PinErrorKind> {
        if self.fail {
            return Err(PinErrorKind::Other);
        }
        let level = self.levels.pop_front().unwrap_or(self.idle);
        if let Some(log) = &self.log {
            log.borrow_mut().push(Event::BusySample(level));
        }
        Ok(level)
    }
}

impl digital::ErrorType for MockInput {
    type Error = PinErrorKind;
}

impl digital::InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.sample()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.sample().map(|level| !level)
    }
}

/// A delay over a virtual clock. Every sleep advances the clock by the requested time plus
/// `late_ns`, the way a timer-backed delay overshoots.
pub struct MockDelay {
    log: Log,
    now_ns: u64,
    late_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
        self.now_ns += u64::from(ns) + self.late_ns;
    }
}

impl Clock for MockDelay {
    fn now(&mut self) -> Instant {
        Instant::from_micros(self.now_ns / 1_000)
    }
}

pub type TestRadio = Lr11xx<MockSpi, MockOutput, MockInput, MockOutput, MockInput, MockDelay>;

/// Describes the simulated radio for one test.
pub struct Setup {
    pub busy_levels: Vec<bool>,
    pub busy_idle: bool,
    pub busy_fails: bool,
    pub responses: Vec<u8>,
    pub fail: Fail,
    /// Extra time every delay sleeps past its request.
    pub delay_late_us: u32,
    pub conf: TransportConfig,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            busy_levels: Vec::new(),
            busy_idle: false,
            busy_fails: false,
            responses: Vec::new(),
            fail: Fail::Never,
            delay_late_us: 0,
            conf: TransportConfig::default(),
        }
    }
}

impl Setup {
    pub fn build(self) -> (TestRadio, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let spi = MockSpi {
            log: log.clone(),
            responses: self.responses.into(),
            fail: self.fail,
        };
        let nss = MockOutput {
            log: log.clone(),
            role: OutputRole::Nss,
        };
        let nrst = MockOutput {
            log: log.clone(),
            role: OutputRole::Reset,
        };
        let busy = MockInput {
            log: Some(log.clone()),
            levels: self.busy_levels.into(),
            idle: self.busy_idle,
            fail: self.busy_fails,
        };
        let alert = MockInput {
            log: None,
            levels: VecDeque::new(),
            idle: false,
            fail: false,
        };
        let delay = MockDelay {
            log: log.clone(),
            now_ns: 0,
            late_ns: u64::from(self.delay_late_us) * 1_000,
        };
        let radio = Lr11xx::new(spi, (nss, busy, nrst, alert), delay, self.conf);
        (radio, log)
    }
}

pub fn radio() -> (TestRadio, Log) {
    Setup::default().build()
}
