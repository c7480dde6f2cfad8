//! Air-interface and TRXD transport constants.
//!
//! These values are fixed by GSM TS 45.002 and the TRX DATA interface
//! conventions and MUST NOT be changed.

// =============================================================================
// FRAME NUMBERING (TS 45.002)
// =============================================================================

/// Length of a GSM hyperframe in TDMA frames (26 * 51 * 2048).
pub const HYPERFRAME_LENGTH: u32 = 2_715_648;

/// Number of timeslots in a TDMA frame.
pub const TIMESLOTS_PER_FRAME: u8 = 8;

// =============================================================================
// BURST GEOMETRY (TS 45.002 section 5.2)
// =============================================================================

/// Length of a normal, frequency correction or synchronization burst in bits.
pub const BURST_LENGTH: usize = 148;

/// Length of an access burst in bits.
pub const ACCESS_BURST_LENGTH: usize = 88;

/// Tail bits on each side of a normal burst.
pub const TAIL_BITS: usize = 3;

/// Data bits in each half of a normal burst.
pub const NB_DATA_HALF_BITS: usize = 58;

/// Normal burst training sequence length.
pub const NB_TSC_BITS: usize = 26;

/// Data bits in each half of a synchronization burst.
pub const SB_DATA_HALF_BITS: usize = 39;

/// Synchronization burst extended training sequence length.
pub const SB_TSC_BITS: usize = 64;

/// Access burst synchronization sequence length.
pub const AB_SYNC_BITS: usize = 41;

/// Encrypted data bits in an access burst.
pub const AB_DATA_BITS: usize = 36;

/// Number of normal burst training sequence codes.
pub const TSC_COUNT: u8 = 8;

// =============================================================================
// UDP PORT LAYOUT
// =============================================================================

/// Default base port of the TRX interface.
pub const DEFAULT_BASE_PORT: u16 = 5700;

/// Default remote peer address.
pub const DEFAULT_REMOTE_ADDR: &str = "127.0.0.1";

/// Offset from the base port of the transceiver-side DATA socket.
pub const TRX_DATA_PORT_OFFSET: u16 = 2;

/// Offset from the base port of the L1-side DATA socket.
pub const L1_DATA_PORT_OFFSET: u16 = 102;

// =============================================================================
// TRXD ENVELOPES
// =============================================================================

/// Header size of a downlink (L1 -> TRX) message: tn + fn + pwr.
pub const TRX_HEADER_SIZE: usize = 6;

/// Header size of an uplink (TRX -> L1) message: tn + fn + rssi + toa.
pub const L1_HEADER_SIZE: usize = 8;

/// Trailing padding appended to uplink messages.
pub const L1_TRAILER_SIZE: usize = 2;

/// Largest payload accepted for a single datagram.
pub const MAX_BURST_PAYLOAD: usize = 1024;

// =============================================================================
// PARAMETER DEFAULTS
// =============================================================================

/// Highest transmit power attenuation picked when none is given.
pub const MAX_DEFAULT_TX_POWER: u8 = 34;

/// Range of RSSI magnitudes (-dBm) picked when none is given.
pub const DEFAULT_RSSI_RANGE: std::ops::RangeInclusive<u8> = 50..=75;
