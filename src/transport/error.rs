//! Transport layer error types.
//!
//! Send failures are never retried; they abort the remaining bursts of a
//! session.

use std::io;

use thiserror::Error;

/// Transport layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error (socket operations).
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The remote host name did not resolve to any address.
    #[error("cannot resolve remote address: {0}")]
    AddressResolution(String),

    /// Payload does not fit a single datagram.
    #[error("burst payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    /// The interface has already been shut down.
    #[error("interface closed")]
    Closed,
}

impl TransportError {
    /// Check if this error prevents any further sending on the interface.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TransportError::Closed | TransportError::AddressResolution(_)
        )
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
