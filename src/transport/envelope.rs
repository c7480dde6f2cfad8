//! TRXD message envelopes.
//!
//! Downlink (towards a transceiver, [`ConnectionMode::Primary`]):
//!
//! ```text
//! +------+--------------+-------+--------------+
//! | TN:1 | FN:4 (BE)    | PWR:1 | bits...      |
//! +------+--------------+-------+--------------+
//! ```
//!
//! Uplink (towards L1, [`ConnectionMode::Secondary`]):
//!
//! ```text
//! +------+--------------+--------+--------+----------+-------+
//! | TN:1 | FN:4 (BE)    | RSSI:1 | TOA:2  | bits...  | PAD:2 |
//! +------+--------------+--------+--------+----------+-------+
//! ```

use crate::core::{
    ConnectionMode, FrameNumber, L1_HEADER_SIZE, L1_TRAILER_SIZE, PowerLevel, TRX_HEADER_SIZE,
    Timeslot,
};

/// A single burst ready to be framed for one dialect.
///
/// All parameters are resolved here; defaulting happens in the
/// interface before a message is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataMessage<'a> {
    /// Target dialect.
    pub mode: ConnectionMode,
    /// Timeslot index.
    pub tn: Timeslot,
    /// TDMA frame number.
    pub fn_: FrameNumber,
    /// Power attenuation (TRX) or RSSI magnitude (L1).
    pub level: PowerLevel,
    /// Burst bits.
    pub burst: &'a [u8],
}

impl DataMessage<'_> {
    /// Size of the encoded message.
    pub fn encoded_len(&self) -> usize {
        match self.mode {
            ConnectionMode::Primary => TRX_HEADER_SIZE + self.burst.len(),
            ConnectionMode::Secondary => L1_HEADER_SIZE + self.burst.len() + L1_TRAILER_SIZE,
        }
    }

    /// Encode into a datagram.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.push(self.tn.0);
        buf.extend_from_slice(&self.fn_.get().to_be_bytes());
        buf.push(self.level.get());

        match self.mode {
            ConnectionMode::Primary => {
                buf.extend_from_slice(self.burst);
            }
            ConnectionMode::Secondary => {
                // TOA is not simulated
                buf.extend_from_slice(&[0, 0]);
                buf.extend_from_slice(self.burst);
                buf.extend_from_slice(&[0; L1_TRAILER_SIZE]);
            }
        }

        buf
    }
}
