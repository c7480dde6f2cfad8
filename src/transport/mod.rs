//! Transport layer for the TRX DATA interface.
//!
//! This module provides:
//!
//! - **Envelopes**: [`DataMessage`] framing for both wire dialects
//! - **Link abstraction**: [`DataLink`], the seam the session sends through
//! - **UDP interface**: [`DataInterface`], a tokio UDP socket implementing [`DataLink`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Transmission session            │
//! ├─────────────────────────────────────────┤
//! │         Transport Layer                 │  ← This module
//! │   envelopes, defaults, teardown         │
//! ├─────────────────────────────────────────┤
//! │              UDP                        │
//! └─────────────────────────────────────────┘
//! ```

mod envelope;
mod error;
mod link;
mod socket;

pub use envelope::*;
pub use error::*;
pub use link::*;
pub use socket::*;
