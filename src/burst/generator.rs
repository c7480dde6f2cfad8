//! Random burst generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tsc::{AB_EXTENDED_TAIL, AB_SYNC, NB_TSC, SB_TSC};
use crate::core::{
    ACCESS_BURST_LENGTH, AB_DATA_BITS, BURST_LENGTH, BurstKind, BurstSource, ConfigError,
    NB_DATA_HALF_BITS, SB_DATA_HALF_BITS, TAIL_BITS, TSC_COUNT,
};

/// Generates bursts with random data bits around the fixed training
/// sequences.
#[derive(Debug, Clone)]
pub struct RandomBurstGenerator<R = StdRng> {
    rng: R,
    tsc: u8,
}

impl RandomBurstGenerator<StdRng> {
    /// Create a generator seeded from the OS entropy source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a deterministic generator.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomBurstGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomBurstGenerator<R> {
    /// Create a generator drawing from `rng`, using training sequence 0.
    pub fn with_rng(rng: R) -> Self {
        Self { rng, tsc: 0 }
    }

    /// Select the normal burst training sequence code.
    pub fn training_sequence(mut self, tsc: u8) -> Result<Self, ConfigError> {
        if tsc >= TSC_COUNT {
            return Err(ConfigError::InvalidTrainingSequence(tsc));
        }
        self.tsc = tsc;
        Ok(self)
    }

    /// Currently selected training sequence code.
    pub fn tsc(&self) -> u8 {
        self.tsc
    }

    fn push_random(&mut self, buf: &mut Vec<u8>, count: usize) {
        buf.extend((0..count).map(|_| self.rng.gen_range(0..=1u8)));
    }

    /// Normal burst.
    pub fn normal(&mut self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BURST_LENGTH);
        buf.extend_from_slice(&[0; TAIL_BITS]);
        self.push_random(&mut buf, NB_DATA_HALF_BITS);
        buf.extend_from_slice(&NB_TSC[usize::from(self.tsc)]);
        self.push_random(&mut buf, NB_DATA_HALF_BITS);
        buf.extend_from_slice(&[0; TAIL_BITS]);
        buf
    }

    /// Frequency correction burst: all zeros.
    pub fn frequency_correction(&mut self) -> Vec<u8> {
        vec![0; BURST_LENGTH]
    }

    /// Synchronization burst.
    pub fn synchronization(&mut self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BURST_LENGTH);
        buf.extend_from_slice(&[0; TAIL_BITS]);
        self.push_random(&mut buf, SB_DATA_HALF_BITS);
        buf.extend_from_slice(&SB_TSC);
        self.push_random(&mut buf, SB_DATA_HALF_BITS);
        buf.extend_from_slice(&[0; TAIL_BITS]);
        buf
    }

    /// Access burst.
    pub fn access(&mut self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ACCESS_BURST_LENGTH);
        buf.extend_from_slice(&AB_EXTENDED_TAIL);
        buf.extend_from_slice(&AB_SYNC);
        self.push_random(&mut buf, AB_DATA_BITS);
        buf.extend_from_slice(&[0; TAIL_BITS]);
        buf
    }
}

impl<R: Rng> BurstSource for RandomBurstGenerator<R> {
    fn generate(&mut self, kind: BurstKind) -> Vec<u8> {
        match kind {
            BurstKind::Normal => self.normal(),
            BurstKind::FrequencyCorrection => self.frequency_correction(),
            BurstKind::Synchronization => self.synchronization(),
            BurstKind::Access => self.access(),
        }
    }
}
