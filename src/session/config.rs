//! Session configuration.

use crate::core::{
    BurstKind, ConfigError, ConnectionMode, DEFAULT_BASE_PORT, DEFAULT_REMOTE_ADDR, FrameNumber,
    L1_DATA_PORT_OFFSET, PowerLevel, TRX_DATA_PORT_OFFSET, TSC_COUNT, Timeslot,
};

/// Validated, immutable parameters of a transmission session.
///
/// Build one with [`SessionConfig::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    remote_addr: String,
    base_port: u16,
    mode: ConnectionMode,
    kind: BurstKind,
    repeat_count: u32,
    frame_number: Option<FrameNumber>,
    timeslot: Option<Timeslot>,
    power_level: Option<PowerLevel>,
    training_sequence: u8,
}

impl SessionConfig {
    /// Start building a configuration for bursts of `kind`.
    pub fn builder(kind: BurstKind) -> SessionConfigBuilder {
        SessionConfigBuilder::new(kind)
    }

    /// Peer host name or address.
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    /// Base UDP port.
    pub fn base_port(&self) -> u16 {
        self.base_port
    }

    /// Wire dialect.
    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Burst kind to send.
    pub fn kind(&self) -> BurstKind {
        self.kind
    }

    /// Number of bursts to send, at least one.
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Starting frame number, random when `None`.
    pub fn frame_number(&self) -> Option<FrameNumber> {
        self.frame_number
    }

    /// Timeslot, left to the interface when `None`.
    pub fn timeslot(&self) -> Option<Timeslot> {
        self.timeslot
    }

    /// Power level, left to the interface when `None`.
    pub fn power_level(&self) -> Option<PowerLevel> {
        self.power_level
    }

    /// Normal burst training sequence code.
    pub fn training_sequence(&self) -> u8 {
        self.training_sequence
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug, Clone)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Create a builder with the default TRX interface settings.
    pub fn new(kind: BurstKind) -> Self {
        Self {
            config: SessionConfig {
                remote_addr: DEFAULT_REMOTE_ADDR.to_string(),
                base_port: DEFAULT_BASE_PORT,
                mode: ConnectionMode::default(),
                kind,
                repeat_count: 1,
                frame_number: None,
                timeslot: None,
                power_level: None,
                training_sequence: 0,
            },
        }
    }

    /// Set the peer address.
    pub fn remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.remote_addr = addr.into();
        self
    }

    /// Set the base port.
    pub fn base_port(mut self, port: u16) -> Self {
        self.config.base_port = port;
        self
    }

    /// Set the wire dialect.
    pub fn mode(mut self, mode: ConnectionMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the number of bursts.
    pub fn repeat_count(mut self, count: u32) -> Self {
        self.config.repeat_count = count;
        self
    }

    /// Set the starting frame number.
    pub fn frame_number(mut self, fn_: Option<FrameNumber>) -> Self {
        self.config.frame_number = fn_;
        self
    }

    /// Set the timeslot.
    pub fn timeslot(mut self, tn: Option<Timeslot>) -> Self {
        self.config.timeslot = tn;
        self
    }

    /// Set the power level.
    pub fn power_level(mut self, level: Option<PowerLevel>) -> Self {
        self.config.power_level = level;
        self
    }

    /// Set the normal burst training sequence code.
    pub fn training_sequence(mut self, tsc: u8) -> Self {
        self.config.training_sequence = tsc;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        let config = self.config;

        if config.repeat_count == 0 {
            return Err(ConfigError::InvalidRepeatCount(config.repeat_count));
        }
        let highest_offset = TRX_DATA_PORT_OFFSET.max(L1_DATA_PORT_OFFSET);
        if config.base_port.checked_add(highest_offset).is_none() {
            return Err(ConfigError::BasePortOutOfRange(config.base_port));
        }
        if config.training_sequence >= TSC_COUNT {
            return Err(ConfigError::InvalidTrainingSequence(
                config.training_sequence,
            ));
        }

        Ok(config)
    }
}
