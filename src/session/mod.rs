//! Burst transmission session.
//!
//! Resolves the DATA connection for a [`SessionConfig`], drives the send
//! loop and guarantees the interface is released on every exit path.

mod config;
mod resolver;
#[allow(clippy::module_inception)]
mod session;
#[cfg(test)]
mod testing;

pub use config::*;
pub use resolver::*;
pub use session::*;
