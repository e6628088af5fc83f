//! The sample-and-report sequencer.

use embassy_time::{with_timeout, Duration, Timer};

use crate::cadence::Tier;
use crate::config::{ConfigError, NodeConfig};
use crate::link::{RadioLink, TemperatureSource};
use crate::telemetry::TelemetryPayload;

/// What happened during one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// The reading was transmitted.
    Sent {
        /// Tier the reading fell into.
        tier: Tier,
        /// The reading, in degrees Celsius.
        celsius: f32,
    },
    /// The reading was taken but the radio rejected the frame. The cycle is skipped.
    TransmitFailed {
        /// Tier the reading fell into.
        tier: Tier,
        /// The reading, in degrees Celsius.
        celsius: f32,
    },
    /// No reading could be taken.
    SensorFailed,
    /// The cycle did not finish within the configured bound.
    TimedOut,
}

/// Outcome of a cycle and how long to wait before the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// What happened.
    pub outcome: CycleOutcome,
    /// Time until the next cycle.
    pub delay: Duration,
}

/// Failure to bring the node up.
#[derive(Debug)]
pub enum StartError<R, S> {
    /// The radio could not be reset or woken.
    Radio(R),
    /// The temperature sensor is missing or misidentified.
    Sensor(S),
}

/// A temperature node reporting over a radio link.
///
/// The node owns both peripherals. Each cycle reads the sensor once, transmits the
/// reading, and picks the delay until the next cycle from how hot it is.
pub struct TelemetryNode<R, S> {
    radio: R,
    sensor: S,
    config: NodeConfig,
}

impl<R, S> TelemetryNode<R, S>
where
    R: RadioLink,
    S: TemperatureSource,
{
    /// Creates a node after checking the configuration.
    pub fn new(radio: R, sensor: S, config: NodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            radio,
            sensor,
            config,
        })
    }

    /// The configuration the node runs with.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Resets and wakes the radio, then checks the sensor.
    pub async fn start(&mut self) -> Result<(), StartError<R::Error, S::Error>> {
        log::debug!("node::start resetting radio");
        self.radio.reset().await.map_err(StartError::Radio)?;
        self.radio.wake().await.map_err(StartError::Radio)?;
        self.sensor.probe().await.map_err(StartError::Sensor)?;
        log::info!("node::start radio and sensor ready");
        Ok(())
    }

    /// Samples the temperature once, transmits it, and reports the next delay.
    ///
    /// A failed transmission keeps the tier's delay. A failed reading retries after the
    /// emergency delay, the shortest one.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let celsius = match self.sensor.read_celsius().await {
            Ok(celsius) => celsius,
            Err(err) => {
                log::warn!("node::cycle sensor read failed: {err:?}");
                return CycleReport {
                    outcome: CycleOutcome::SensorFailed,
                    delay: self.config.emergency_delay,
                };
            }
        };

        let tier = Tier::classify(celsius, &self.config);
        let payload = TelemetryPayload::from_celsius(celsius);
        log::debug!("node::cycle {celsius} C -> {tier:?}, payload: {payload:?}");

        let outcome = match self
            .radio
            .send(self.config.telemetry_opcode, payload.as_bytes())
            .await
        {
            Ok(()) => CycleOutcome::Sent { tier, celsius },
            Err(err) => {
                log::warn!("node::cycle transmit failed, skipping cycle: {err:?}");
                CycleOutcome::TransmitFailed { tier, celsius }
            }
        };

        CycleReport {
            outcome,
            delay: tier.delay(&self.config),
        }
    }

    /// Runs cycles forever, sleeping between them.
    ///
    /// A cycle exceeding `cycle_timeout` is abandoned; the radio is then reset and woken so
    /// that no chip-select window stays open, and the next cycle follows after the emergency
    /// delay.
    pub async fn run(&mut self) -> ! {
        loop {
            let report = match with_timeout(self.config.cycle_timeout, self.run_cycle()).await {
                Ok(report) => report,
                Err(_) => {
                    log::warn!(
                        "node::run cycle exceeded {}ms, recovering radio",
                        self.config.cycle_timeout.as_millis()
                    );
                    self.recover().await;
                    CycleReport {
                        outcome: CycleOutcome::TimedOut,
                        delay: self.config.emergency_delay,
                    }
                }
            };

            log::info!(
                "node::run {:?}, next cycle in {}s",
                report.outcome,
                report.delay.as_secs()
            );
            Timer::after(report.delay).await;
        }
    }

    async fn recover(&mut self) {
        if let Err(err) = self.radio.reset().await {
            log::error!("node::recover radio reset failed: {err:?}");
        }
        // Waking pulses NSS and releases it, closing any window left open.
        if let Err(err) = self.radio.wake().await {
            log::error!("node::recover radio wake failed: {err:?}");
        }
    }
}
