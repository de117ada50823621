//! Generic breadth-first state-space search.
//!
//! Any type implementing [`Configuration`] can be handed to [`solve`], which
//! returns a shortest sequence of moves from the start to a goal state. The
//! [`puzzles`] module carries two small clients of the engine: a clock and
//! a water buckets puzzle.

pub mod configuration;
pub mod hint;
pub mod puzzles;
pub mod solver;

// Re-export main types
pub use configuration::Configuration;
pub use hint::{hint, Hint};
pub use puzzles::clock::{Clock, ClockConfig};
pub use puzzles::water::{Water, WaterConfig};
pub use puzzles::PuzzleError;
pub use solver::{solve, solve_with_config, Solution, SolveError, SolverConfig};
