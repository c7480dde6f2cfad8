//! Error types for the burst generator.

use thiserror::Error;

/// Errors detected while building a session configuration.
///
/// All of these are raised before any socket is opened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Connection mode is neither TRX nor L1.
    #[error("unknown connection type: {0}")]
    UnknownConnectionMode(String),

    /// Burst type is not one of NB, FB, SB, AB.
    #[error("unknown burst type: {0}")]
    UnknownBurstKind(String),

    /// Frame number outside the hyperframe.
    #[error("frame number {0} outside hyperframe")]
    FrameNumberOutOfRange(u64),

    /// Power level does not fit the one-byte wire field.
    #[error("power level {0} out of range")]
    PowerLevelOutOfRange(i64),

    /// Burst count must be at least one.
    #[error("invalid burst count: {0}")]
    InvalidRepeatCount(u32),

    /// Base port leaves no room for the DATA port offsets.
    #[error("base port {0} out of range")]
    BasePortOutOfRange(u16),

    /// Training sequence code must be in 0..=7.
    #[error("invalid training sequence code: {0}")]
    InvalidTrainingSequence(u8),

    /// A numeric value could not be parsed.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;
