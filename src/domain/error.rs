//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Value;

/// Domain errors represent violated tree invariants.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("sequence not sorted at position {position}: {previous} > {current}")]
    UnsortedSequence {
        position: usize,
        previous: Value,
        current: Value,
    },
}
