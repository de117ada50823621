//! Concrete puzzles built on the generic solver.
//!
//! Each puzzle splits into an immutable definition, validated once at
//! construction, and lightweight states that borrow it. Only the state's own
//! fields take part in equality and hashing.

pub mod clock;
pub mod water;

use thiserror::Error;

/// Invalid puzzle definition or state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("a clock needs at least one hour")]
    NoHours,

    #[error("hour {hour} is not on a {hours}-hour clock")]
    HourOutOfRange { hour: u32, hours: u32 },

    #[error("at least one bucket is required")]
    NoBuckets,

    #[error("expected {expected} bucket amounts, got {actual}")]
    BucketCountMismatch { expected: usize, actual: usize },

    #[error("bucket {index} holds at most {capacity}, got {amount}")]
    BucketOverflow {
        index: usize,
        amount: u32,
        capacity: u32,
    },
}
