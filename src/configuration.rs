//! The state contract every puzzle implements to be searchable.
//!
//! The solver only ever talks to states through this trait. Equality and
//! hashing are supertraits so a state's identity for deduplication is
//! always the same thing it compares equal on.

use std::fmt::Display;
use std::hash::Hash;

/// One immutable state of a search problem.
///
/// `Eq` and `Hash` must agree and must only look at problem-relevant
/// fields. A shared reference back to the puzzle definition is not part of
/// a state's identity.
pub trait Configuration: Clone + Eq + Hash + Display {
    /// Collection returned by [`Configuration::neighbors`].
    type Neighbors: IntoIterator<Item = Self>;

    /// Whether this state is a goal.
    fn is_solution(&self) -> bool;

    /// All states reachable in exactly one move, freshly constructed.
    ///
    /// Order matters only for tie-breaking between equal-length solutions:
    /// earlier neighbors win.
    fn neighbors(&self) -> Self::Neighbors;

    /// Human-readable rendering used for reporting.
    fn describe(&self) -> String {
        self.to_string()
    }
}
