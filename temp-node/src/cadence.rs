//! Reporting cadence.

use embassy_time::Duration;

use crate::config::NodeConfig;

/// How urgently the node reports, derived from the latest temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// At or below the normal threshold.
    Normal,
    /// Above the normal threshold.
    Fast,
    /// Above the emergency threshold.
    Emergency,
}

impl Tier {
    /// Classifies a temperature. A reading equal to a threshold stays in the lower tier.
    pub fn classify(celsius: f32, config: &NodeConfig) -> Self {
        if celsius > config.emergency_threshold {
            Tier::Emergency
        } else if celsius > config.normal_threshold {
            Tier::Fast
        } else {
            Tier::Normal
        }
    }

    /// The delay to wait after reporting in this tier.
    pub fn delay(self, config: &NodeConfig) -> Duration {
        match self {
            Tier::Normal => config.normal_delay,
            Tier::Fast => config.fast_delay,
            Tier::Emergency => config.emergency_delay,
        }
    }
}
