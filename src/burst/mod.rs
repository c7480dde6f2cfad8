//! Burst generation.
//!
//! Produces raw hard-bit payloads for the four GSM burst types:
//!
//! | Kind | Bits | Layout |
//! |------|------|--------|
//! | NB   | 148  | tail(3) data(58) tsc(26) data(58) tail(3) |
//! | FB   | 148  | all zeros |
//! | SB   | 148  | tail(3) data(39) etsc(64) data(39) tail(3) |
//! | AB   | 88   | ext-tail(8) sync(41) data(36) tail(3) |

mod generator;
pub mod tsc;

pub use generator::RandomBurstGenerator;
