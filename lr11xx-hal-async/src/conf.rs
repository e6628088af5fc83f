//! Wrapper for transport timing parameters.

/// Timing and framing parameters of the LR11xx transport.
///
/// Built once at start-up and handed to [`crate::Lr11xx::new`]; the driver never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Longest time the BUSY line may stay high before an operation gives up, in microseconds.
    pub busy_timeout_us: u32,
    /// Pause between two samples of the BUSY line, in microseconds.
    pub busy_poll_interval_us: u32,
    /// How long NRESET is held low during [`crate::Lr11xx::reset`], in milliseconds.
    pub reset_hold_ms: u32,
    /// How long NSS is held low during [`crate::Lr11xx::wake`], in milliseconds.
    pub wake_pulse_ms: u32,
    /// Byte clocked out on MOSI while the response of a read is captured.
    pub filler_byte: u8,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            busy_timeout_us: 100_000,
            busy_poll_interval_us: 10,
            reset_hold_ms: 1,
            wake_pulse_ms: 1,
            filler_byte: 0x00,
        }
    }
}
