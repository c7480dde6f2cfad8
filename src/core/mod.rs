//! Core constants, data model, and error types.
//!
//! This module has no transport dependencies and is always included.

mod constants;
mod error;
mod traits;
mod types;

pub use constants::*;
pub use error::*;
pub use traits::*;
pub use types::*;
