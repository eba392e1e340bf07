//! Identifier generation port.

use std::sync::Arc;

use hexkit_domain::error::Outcome;

/// Source of fresh model identifiers.
///
/// Generators must be safe to share between concurrent creations and never
/// hand out the same identifier twice.
pub trait IdGenerator<I>: Send + Sync {
    /// Produce the next identifier.
    ///
    /// # Errors
    ///
    /// Returns a failure when no further identifier can be produced.
    fn next_id(&self) -> Outcome<I>;
}

impl<I, G: IdGenerator<I>> IdGenerator<I> for Arc<G> {
    fn next_id(&self) -> Outcome<I> {
        (**self).next_id()
    }
}
