//! The BUSY-line gate consulted before every bus transaction.

use core::fmt::{self, Debug};

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::conf::TransportConfig;

/// Failure of a [`wait_on_busy`] call.
pub enum BusyError<TPINERR> {
    /// The BUSY line stayed high for the whole configured timeout.
    Timeout {
        /// Time measured since the first sample, in microseconds.
        waited_us: u32,
    },
    /// Sampling the BUSY line failed.
    Pin(TPINERR),
}

impl<TPINERR: Debug> Debug for BusyError<TPINERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { waited_us } => write!(f, "Timeout({waited_us}us)"),
            Self::Pin(err) => write!(f, "Pin({err:?})"),
        }
    }
}

/// A monotonic time source for bounding the BUSY poll.
///
/// Implemented for [`embassy_time::Delay`], so the delay handed to the driver also serves
/// as its clock.
pub trait Clock {
    /// The current time.
    fn now(&mut self) -> Instant;
}

impl Clock for embassy_time::Delay {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// Waits until the BUSY line reads low.
///
/// The line is sampled once up front; while it stays high the gate sleeps for
/// `busy_poll_interval_us` and samples again. The timeout is measured on the [`Clock`] of
/// `delay` from the first sample, so late wake-ups count against it. A line that is already
/// low costs exactly one sample and no delay.
pub async fn wait_on_busy<TBUSY, D>(
    busy: &mut TBUSY,
    delay: &mut D,
    conf: &TransportConfig,
) -> Result<(), BusyError<TBUSY::Error>>
where
    TBUSY: InputPin,
    D: DelayNs + Clock,
{
    let timeout = Duration::from_micros(u64::from(conf.busy_timeout_us));
    let interval = conf.busy_poll_interval_us.max(1);
    let start = delay.now();

    while busy.is_high().map_err(BusyError::Pin)? {
        let waited = delay.now().saturating_duration_since(start);
        if waited >= timeout {
            let waited_us = u32::try_from(waited.as_micros()).unwrap_or(u32::MAX);
            log::warn!("lr11xx::busy still high after {waited_us}us");
            return Err(BusyError::Timeout { waited_us });
        }
        delay.delay_us(interval).await;
    }

    let waited = delay.now().saturating_duration_since(start);
    if waited > Duration::from_ticks(0) {
        log::trace!("lr11xx::busy released after {}us", waited.as_micros());
    }
    Ok(())
}
