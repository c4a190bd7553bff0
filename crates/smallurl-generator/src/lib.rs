pub mod biased;
pub mod error;

pub use biased::{BiasSettings, BiasedGenerator};
pub use error::Error;

use smallurl_core::{LengthClass, ShortId};

/// Trait for generating candidate short ids.
///
/// Implementations are pure generators that don't interact with storage.
/// Candidates are not guaranteed to be unique; the caller resolves
/// collisions against the repository.
pub trait ShortIdGenerator: Send + Sync + 'static {
    /// Produces a candidate id statistically biased toward `class`.
    fn generate(&self, class: LengthClass) -> ShortId;
}
