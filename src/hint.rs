//! Single-step hints for interactive front-ends.

use crate::configuration::Configuration;
use crate::solver::solve;

/// What to do next from a live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint<C> {
    /// No goal is reachable from the current state
    Unsolvable,
    /// The current state is already a goal
    AlreadySolved,
    /// First move along a shortest path
    Next(C),
}

/// Solve from `current` and return the first recommended move.
///
/// The search starts from whatever state the player is in now, so hints stay
/// correct after moves that left the previous shortest path.
pub fn hint<C: Configuration>(current: C) -> Hint<C> {
    let mut path = solve(current).path.into_iter();
    match (path.next(), path.next()) {
        (None, _) => Hint::Unsolvable,
        (Some(_), None) => Hint::AlreadySolved,
        (Some(_), Some(next)) => Hint::Next(next),
    }
}
