//! # trx-burst-gen
//!
//! Synthetic traffic generator for the TRX DATA (TRXD) interface.
//!
//! Fabricates random GSM bursts and sends them, one per TDMA frame, over UDP
//! to a transceiver or to a lower-layer (L1) stack. Useful for protocol
//! fuzzing and conformance testing of either side of the interface.
//!
//! ## Feature Flags
//!
//! - `transport` (default): UDP interface, session loop, signal handling
//! - `cli` (default): command line front end (required by the binary)
//!
//! ## Modules
//!
//! - [`core`]: constants, data model, errors (always included)
//! - [`burst`]: random burst generator (always included)
//! - [`transport`]: TRXD envelopes and the UDP DATA interface
//! - [`session`]: configuration, port resolution, send loop
//! - [`lifecycle`]: interrupt handling
//!
//! ## Example Usage
//!
//! ```no_run
//! use trx_burst_gen::prelude::*;
//!
//! # async fn demo() -> Result<(), SessionError> {
//! let config = SessionConfig::builder(BurstKind::Normal)
//!     .mode(ConnectionMode::Primary)
//!     .repeat_count(10)
//!     .build()?;
//!
//! let lifecycle = Lifecycle::new();
//! lifecycle.install();
//!
//! let outcome = execute(&config, &lifecycle).await?;
//! println!("sent {} bursts", outcome.sent());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Burst generation (always included)
pub mod burst;

// Transport layer (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod transport;

// Session and lifecycle (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod lifecycle;

#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod session;

// Command line (feature-gated)
#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod cli;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::burst::RandomBurstGenerator;
    pub use crate::core::*;

    #[cfg(feature = "transport")]
    pub use crate::lifecycle::{Cancellation, Lifecycle, LifecycleState};
    #[cfg(feature = "transport")]
    pub use crate::session::{
        PortPair, RunOutcome, SessionConfig, SessionConfigBuilder, SessionError,
        TransmissionSession, execute,
    };
    #[cfg(feature = "transport")]
    pub use crate::transport::{DataInterface, DataLink, DataMessage, TransportError};
}

pub use crate::burst::RandomBurstGenerator;
pub use crate::core::{BurstKind, ConfigError, ConnectionMode, FrameNumber, PowerLevel, Timeslot};
