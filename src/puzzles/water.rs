//! Water buckets puzzle: fill, empty and pour between buckets until one of
//! them holds the target amount.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use smallvec::SmallVec;

use super::PuzzleError;
use crate::configuration::Configuration;

/// Bucket amounts, inline for the usual handful of buckets
type Amounts = SmallVec<[u32; 4]>;

/// A water puzzle definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Water {
    amount: u32,
    capacities: Vec<u32>,
}

impl Water {
    pub fn new(amount: u32, capacities: Vec<u32>) -> Result<Self, PuzzleError> {
        if capacities.is_empty() {
            return Err(PuzzleError::NoBuckets);
        }
        Ok(Self { amount, capacities })
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn capacities(&self) -> &[u32] {
        &self.capacities
    }

    /// All buckets empty.
    pub fn start(&self) -> WaterConfig<'_> {
        WaterConfig {
            amounts: SmallVec::from_elem(0, self.capacities.len()),
            puzzle: self,
        }
    }

    /// Buckets holding the given amounts.
    pub fn config(&self, amounts: &[u32]) -> Result<WaterConfig<'_>, PuzzleError> {
        if amounts.len() != self.capacities.len() {
            return Err(PuzzleError::BucketCountMismatch {
                expected: self.capacities.len(),
                actual: amounts.len(),
            });
        }
        for (index, (&amount, &capacity)) in amounts.iter().zip(&self.capacities).enumerate() {
            if amount > capacity {
                return Err(PuzzleError::BucketOverflow {
                    index,
                    amount,
                    capacity,
                });
            }
        }
        Ok(WaterConfig {
            amounts: SmallVec::from_slice(amounts),
            puzzle: self,
        })
    }
}

/// Fill levels of every bucket of a particular [`Water`] puzzle.
#[derive(Debug, Clone)]
pub struct WaterConfig<'p> {
    amounts: Amounts,
    puzzle: &'p Water,
}

impl<'p> WaterConfig<'p> {
    pub fn amounts(&self) -> &[u32] {
        &self.amounts
    }

    /// A copy of this state with `edit` applied to the amounts.
    fn with(&self, edit: impl FnOnce(&mut Amounts)) -> WaterConfig<'p> {
        let mut amounts = self.amounts.clone();
        edit(&mut amounts);
        WaterConfig {
            amounts,
            puzzle: self.puzzle,
        }
    }
}

impl PartialEq for WaterConfig<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.amounts == other.amounts
    }
}

impl Eq for WaterConfig<'_> {}

impl Hash for WaterConfig<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.amounts.hash(state);
    }
}

impl fmt::Display for WaterConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.amounts.as_slice())
    }
}

impl<'p> Configuration for WaterConfig<'p> {
    type Neighbors = Vec<WaterConfig<'p>>;

    fn is_solution(&self) -> bool {
        self.amounts.contains(&self.puzzle.amount)
    }

    /// For each bucket in order: empty it, fill it, then pour it into every
    /// other bucket that still has room.
    fn neighbors(&self) -> Self::Neighbors {
        let capacities = &self.puzzle.capacities;
        let mut neighbors = Vec::new();

        for (i, (&amount, &capacity)) in self.amounts.iter().zip(capacities).enumerate() {
            if amount != 0 {
                neighbors.push(self.with(|a| a[i] = 0));
            }
            if amount != capacity {
                neighbors.push(self.with(|a| a[i] = capacity));
            }
            if amount == 0 {
                continue;
            }
            for (j, (&other, &room)) in self.amounts.iter().zip(capacities).enumerate() {
                if j == i || other == room {
                    continue;
                }
                let poured = amount.min(room - other);
                neighbors.push(self.with(|a| {
                    a[i] -= poured;
                    a[j] += poured;
                }));
            }
        }

        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::solve;

    fn levels(path: &[WaterConfig<'_>]) -> Vec<Vec<u32>> {
        path.iter().map(|c| c.amounts().to_vec()).collect()
    }

    #[test]
    fn test_rejects_bad_definitions() {
        assert_eq!(Water::new(2, vec![]), Err(PuzzleError::NoBuckets));

        let water = Water::new(2, vec![5, 3]).unwrap();
        assert_eq!(
            water.config(&[1]).unwrap_err(),
            PuzzleError::BucketCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            water.config(&[1, 4]).unwrap_err(),
            PuzzleError::BucketOverflow {
                index: 1,
                amount: 4,
                capacity: 3
            }
        );
    }

    #[test]
    fn test_neighbor_order() {
        let water = Water::new(2, vec![5, 3]).unwrap();
        let config = water.config(&[4, 1]).unwrap();

        let next = levels(&config.neighbors());

        assert_eq!(
            next,
            vec![
                vec![0, 1], // empty 0
                vec![5, 1], // fill 0
                vec![2, 3], // pour 0 into 1
                vec![4, 0], // empty 1
                vec![4, 3], // fill 1
                vec![5, 0], // pour 1 into 0
            ]
        );
    }

    #[test]
    fn test_pour_exactly_to_brim() {
        let water = Water::new(1, vec![3, 6]).unwrap();
        let config = water.config(&[3, 3]).unwrap();

        let next = levels(&config.neighbors());

        assert!(next.contains(&vec![0, 6]));
    }

    #[test]
    fn test_two_buckets() {
        let water = Water::new(2, vec![5, 3]).unwrap();

        let solution = solve(water.start());

        assert_eq!(levels(&solution.path), vec![vec![0, 0], vec![5, 0], vec![2, 3]]);
        assert!(solution.goal().is_some_and(|g| g.is_solution()));
    }

    #[test]
    fn test_classic_four_litres() {
        let water = Water::new(4, vec![3, 5]).unwrap();

        let solution = solve(water.start());

        assert_eq!(solution.path.first(), Some(&water.start()));
        assert_eq!(solution.moves(), Some(6));
        assert!(solution.goal().is_some_and(|g| g.amounts().contains(&4)));
    }

    #[test]
    fn test_unreachable_amount() {
        // Every reachable level is even
        let water = Water::new(5, vec![2, 6]).unwrap();

        let solution = solve(water.start());

        assert!(solution.path.is_empty());
        // a in {0, 2}, b in {0, 2, 4, 6}
        assert_eq!(solution.unique_visited, 8);
    }

    #[test]
    fn test_target_zero_is_trivial() {
        let water = Water::new(0, vec![4]).unwrap();
        let solution = solve(water.start());
        assert_eq!(levels(&solution.path), vec![vec![0]]);
    }

    #[test]
    fn test_display() {
        let water = Water::new(2, vec![5, 3]).unwrap();
        assert_eq!(water.config(&[2, 3]).unwrap().to_string(), "[2, 3]");
    }
}
