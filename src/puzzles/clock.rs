//! Clock puzzle: turn a single hand from a start hour to a goal hour, one
//! hour at a time in either direction.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use super::PuzzleError;
use crate::configuration::Configuration;

/// A clock puzzle definition. Hours are numbered `1..=hours`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clock {
    hours: u32,
    start: u32,
    end: u32,
}

impl Clock {
    pub fn new(hours: u32, start: u32, end: u32) -> Result<Self, PuzzleError> {
        if hours == 0 {
            return Err(PuzzleError::NoHours);
        }
        for hour in [start, end] {
            if !(1..=hours).contains(&hour) {
                return Err(PuzzleError::HourOutOfRange { hour, hours });
            }
        }
        Ok(Self { hours, start, end })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn start(&self) -> ClockConfig<'_> {
        ClockConfig {
            hour: self.start,
            puzzle: self,
        }
    }

    /// The hand pointing at `hour`.
    pub fn config(&self, hour: u32) -> Result<ClockConfig<'_>, PuzzleError> {
        if !(1..=self.hours).contains(&hour) {
            return Err(PuzzleError::HourOutOfRange {
                hour,
                hours: self.hours,
            });
        }
        Ok(ClockConfig { hour, puzzle: self })
    }
}

/// Position of the hand on a particular [`Clock`].
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig<'p> {
    hour: u32,
    puzzle: &'p Clock,
}

impl ClockConfig<'_> {
    pub fn hour(&self) -> u32 {
        self.hour
    }
}

impl PartialEq for ClockConfig<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.hour == other.hour
    }
}

impl Eq for ClockConfig<'_> {}

impl Hash for ClockConfig<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hour.hash(state);
    }
}

impl fmt::Display for ClockConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hour)
    }
}

impl<'p> Configuration for ClockConfig<'p> {
    type Neighbors = SmallVec<[ClockConfig<'p>; 2]>;

    fn is_solution(&self) -> bool {
        self.hour == self.puzzle.end
    }

    /// Counter-clockwise first, then clockwise.
    fn neighbors(&self) -> Self::Neighbors {
        let hours = self.puzzle.hours;
        let back = if self.hour == 1 { hours } else { self.hour - 1 };
        let forward = if self.hour == hours { 1 } else { self.hour + 1 };
        smallvec![
            ClockConfig {
                hour: back,
                puzzle: self.puzzle,
            },
            ClockConfig {
                hour: forward,
                puzzle: self.puzzle,
            },
        ]
    }
}
