//! Node configuration.

use embassy_time::Duration;

/// Opcode written ahead of every telemetry payload.
///
/// A placeholder: the LR11xx command set has no single-byte "send telemetry" command, so
/// the radio firmware on the other end of the link has to agree on this value.
pub const TELEMETRY_OPCODE: u8 = 0x80;

/// Thresholds and reporting delays of the node.
///
/// Constructed once at start-up and handed to [`crate::TelemetryNode::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// Above this temperature (°C) the node reports on the fast cadence.
    pub normal_threshold: f32,
    /// Above this temperature (°C) the node reports on the emergency cadence.
    pub emergency_threshold: f32,
    /// Delay after a report at or below `normal_threshold`.
    pub normal_delay: Duration,
    /// Delay after a report above `normal_threshold`.
    pub fast_delay: Duration,
    /// Delay after a report above `emergency_threshold`.
    pub emergency_delay: Duration,
    /// Command byte preceding the payload on the radio bus.
    pub telemetry_opcode: u8,
    /// Upper bound for one sample-and-transmit cycle.
    pub cycle_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            normal_threshold: 30.0,
            emergency_threshold: 40.0,
            normal_delay: Duration::from_secs(60 * 60),
            fast_delay: Duration::from_secs(30 * 60),
            emergency_delay: Duration::from_secs(10 * 60),
            telemetry_opcode: TELEMETRY_OPCODE,
            cycle_timeout: Duration::from_secs(5),
        }
    }
}

/// Reasons a [`NodeConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `emergency_threshold` must be strictly above `normal_threshold`.
    ThresholdOrder,
    /// Delays must satisfy emergency <= fast <= normal.
    DelayOrder,
    /// A zero cycle timeout would fail every cycle.
    ZeroCycleTimeout,
}

impl NodeConfig {
    /// Checks the ordering the cadence classifier relies on.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so that NaN thresholds are rejected too.
        if !(self.emergency_threshold > self.normal_threshold) {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.emergency_delay > self.fast_delay || self.fast_delay > self.normal_delay {
            return Err(ConfigError::DelayOrder);
        }
        if self.cycle_timeout == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroCycleTimeout);
        }
        Ok(())
    }
}
