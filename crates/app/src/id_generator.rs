//! In-process identifier generators.

use std::sync::Mutex;

use hexkit_domain::error::{Failure, Outcome};

use crate::ports::IdGenerator;

/// Monotonic counter handing out `first`, `first + 1`, … up to and
/// including `u64::MAX`.
///
/// Produces any identifier type convertible from `u64`.
#[derive(Debug)]
pub struct SequentialIds {
    /// `None` once `u64::MAX` has been issued.
    next: Mutex<Option<u64>>,
}

impl SequentialIds {
    /// Start counting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Mutex::new(Some(first)),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: From<u64>> IdGenerator<I> for SequentialIds {
    fn next_id(&self) -> Outcome<I> {
        let mut next = self
            .next
            .lock()
            .map_err(|_| Failure::internal("identifier sequence lock poisoned"))?;
        let id = next.ok_or_else(|| Failure::internal("identifier sequence exhausted"))?;
        *next = id.checked_add(1);
        Ok(I::from(id))
    }
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl<I: From<uuid::Uuid>> IdGenerator<I> for RandomIds {
    fn next_id(&self) -> Outcome<I> {
        Ok(uuid::Uuid::new_v4().into())
    }
}
