//! Data model shared by the session, generator and transport.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::constants::HYPERFRAME_LENGTH;
use super::error::ConfigError;

/// TDMA frame number, always within `[0, HYPERFRAME_LENGTH)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameNumber(u32);

impl FrameNumber {
    /// Frame number zero.
    pub const ZERO: Self = Self(0);

    /// Create a frame number, rejecting values outside the hyperframe.
    pub fn new(value: u32) -> Result<Self, ConfigError> {
        if value < HYPERFRAME_LENGTH {
            Ok(Self(value))
        } else {
            Err(ConfigError::FrameNumberOutOfRange(u64::from(value)))
        }
    }

    /// Draw a frame number uniformly from the hyperframe.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..HYPERFRAME_LENGTH))
    }

    /// The next frame number, wrapping at the end of the hyperframe.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % HYPERFRAME_LENGTH)
    }

    /// Raw value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FrameNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FrameNumber {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(s.to_string()))?;
        u32::try_from(value)
            .ok()
            .filter(|v| *v < HYPERFRAME_LENGTH)
            .map(Self)
            .ok_or(ConfigError::FrameNumberOutOfRange(value))
    }
}

impl TryFrom<u32> for FrameNumber {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FrameNumber> for u32 {
    fn from(fn_: FrameNumber) -> u32 {
        fn_.0
    }
}

/// Timeslot index of a burst.
///
/// Not range-checked against [`TIMESLOTS_PER_FRAME`](super::TIMESLOTS_PER_FRAME)
/// so that out-of-range indices can be sent while fuzzing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeslot(pub u8);

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Magnitude-only power parameter.
///
/// In the TRX dialect this is the transmit power attenuation, in the L1
/// dialect it carries the RSSI magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerLevel(u8);

impl PowerLevel {
    /// Create a power level from a magnitude.
    pub fn new(level: u8) -> Self {
        Self(level)
    }

    /// Normalize a signed user value, dropping its sign.
    pub fn from_signed(value: i64) -> Result<Self, ConfigError> {
        u8::try_from(value.unsigned_abs())
            .map(Self)
            .map_err(|_| ConfigError::PowerLevelOutOfRange(value))
    }

    /// Raw magnitude.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PowerLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(s.to_string()))?;
        Self::from_signed(value)
    }
}

/// Wire dialect of the DATA interface.
///
/// Both dialects use the same pair of ports with the send and receive roles
/// swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionMode {
    /// Talk to a transceiver, acting as L1 (`TRX`).
    #[default]
    Primary,
    /// Talk to a lower-layer stack, acting as a transceiver (`L1`).
    Secondary,
}

impl ConnectionMode {
    /// Short name used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionMode::Primary => "TRX",
            ConnectionMode::Secondary => "L1",
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRX" | "PRIMARY" => Ok(ConnectionMode::Primary),
            "L1" | "SECONDARY" => Ok(ConnectionMode::Secondary),
            _ => Err(ConfigError::UnknownConnectionMode(s.to_string())),
        }
    }
}

/// Kind of burst to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurstKind {
    /// Normal burst (NB).
    Normal,
    /// Frequency correction burst (FB).
    FrequencyCorrection,
    /// Synchronization burst (SB).
    Synchronization,
    /// Access burst (AB).
    Access,
}

impl BurstKind {
    /// All burst kinds.
    pub const ALL: [BurstKind; 4] = [
        BurstKind::Normal,
        BurstKind::FrequencyCorrection,
        BurstKind::Synchronization,
        BurstKind::Access,
    ];

    /// Two-letter abbreviation.
    pub fn as_str(self) -> &'static str {
        match self {
            BurstKind::Normal => "NB",
            BurstKind::FrequencyCorrection => "FB",
            BurstKind::Synchronization => "SB",
            BurstKind::Access => "AB",
        }
    }
}

impl fmt::Display for BurstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BurstKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NB" | "NORMAL" => Ok(BurstKind::Normal),
            "FB" | "FREQUENCY_CORRECTION" => Ok(BurstKind::FrequencyCorrection),
            "SB" | "SYNCHRONIZATION" => Ok(BurstKind::Synchronization),
            "AB" | "ACCESS" => Ok(BurstKind::Access),
            _ => Err(ConfigError::UnknownBurstKind(s.to_string())),
        }
    }
}
