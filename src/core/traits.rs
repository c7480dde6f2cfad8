//! Core traits for burst generation.

use super::types::BurstKind;

/// Source of burst payloads.
///
/// Payloads are one byte per hard bit (`0` or `1`). Implementations must
/// produce the same geometry for a kind on every call; only the random
/// data bits may differ.
///
/// # Example
///
/// ```
/// use trx_burst_gen::core::{BurstKind, BurstSource};
///
/// struct Silence;
///
/// impl BurstSource for Silence {
///     fn generate(&mut self, kind: BurstKind) -> Vec<u8> {
///         match kind {
///             BurstKind::Access => vec![0; 88],
///             _ => vec![0; 148],
///         }
///     }
/// }
///
/// assert_eq!(Silence.generate(BurstKind::Normal).len(), 148);
/// ```
pub trait BurstSource {
    /// Produce a payload for the requested kind.
    fn generate(&mut self, kind: BurstKind) -> Vec<u8>;
}

impl<T: BurstSource + ?Sized> BurstSource for Box<T> {
    fn generate(&mut self, kind: BurstKind) -> Vec<u8> {
        (**self).generate(kind)
    }
}
