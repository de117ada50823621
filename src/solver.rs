//! Breadth-first solver over any [`Configuration`].
//!
//! States are expanded in the order they were first discovered and goals
//! are detected when a state is discovered, not when it is expanded. The
//! first goal found is therefore at minimum distance from the start, with
//! ties broken by the order each state yields its neighbors.
//!
//! Every call runs on fresh bookkeeping; the solver keeps no state between
//! calls.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

use crate::configuration::Configuration;

/// Optional limits for [`solve_with_config`]. The default is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of states to expand
    pub max_expansions: Option<usize>,
    /// Maximum wall-clock time to search
    pub timeout: Option<Duration>,
}

impl SolverConfig {
    /// True when neither limit is set; [`solve_with_config`] then behaves
    /// exactly like [`solve`].
    pub fn is_unbounded(&self) -> bool {
        self.max_expansions.is_none() && self.timeout.is_none()
    }
}

/// Why a bounded search gave up before finishing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("expansion limit of {limit} reached with {unique_visited} unique configurations visited")]
    ExpansionLimit { limit: usize, unique_visited: usize },

    #[error("search timed out after {elapsed_ms} ms with {unique_visited} unique configurations visited")]
    Timeout { elapsed_ms: u64, unique_visited: usize },
}

impl SolveError {
    /// Distinct states discovered before the search stopped.
    pub fn unique_visited(&self) -> usize {
        match self {
            SolveError::ExpansionLimit { unique_visited, .. }
            | SolveError::Timeout { unique_visited, .. } => *unique_visited,
        }
    }
}

/// Outcome of a search.
///
/// An empty `path` means no goal is reachable from the start. That is a
/// normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<C> {
    /// Start state first, goal state last
    pub path: Vec<C>,
    /// Neighbors generated across all expansions, duplicates included
    pub total_generated: usize,
    /// Distinct states discovered, including the start
    pub unique_visited: usize,
    /// States taken off the frontier and expanded
    pub expansions: usize,
}

impl<C> Solution<C> {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn goal(&self) -> Option<&C> {
        self.path.last()
    }

    /// Number of moves from start to goal, `None` when unsolved.
    pub fn moves(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// A discovered state and the index of the state it was first reached from.
#[derive(Debug)]
struct Discovered<C> {
    state: C,
    parent: Option<usize>,
}

/// FIFO queue plus predecessor map.
///
/// The map's key set is exactly the set of states ever enqueued, so it is
/// also the visited set. States live in `nodes` and are referred to by
/// index everywhere else.
#[derive(Debug)]
struct Frontier<C> {
    nodes: Vec<Discovered<C>>,
    index: HashMap<C, usize>,
    queue: VecDeque<usize>,
}

impl<C: Configuration> Frontier<C> {
    fn seeded(start: C) -> Self {
        let mut index = HashMap::new();
        index.insert(start.clone(), 0);
        Self {
            nodes: vec![Discovered {
                state: start,
                parent: None,
            }],
            index,
            queue: VecDeque::from([0]),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    fn unique(&self) -> usize {
        self.nodes.len()
    }

    fn state(&self, id: usize) -> &C {
        &self.nodes[id].state
    }

    /// Record `state` as reached from `parent` and enqueue it.
    ///
    /// Returns `None` if the state was already discovered; its recorded
    /// predecessor is left untouched.
    fn discover(&mut self, state: C, parent: usize) -> Option<usize> {
        let id = self.nodes.len();
        match self.index.entry(state) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let state = slot.key().clone();
                slot.insert(id);
                self.nodes.push(Discovered {
                    state,
                    parent: Some(parent),
                });
                self.queue.push_back(id);
                Some(id)
            }
        }
    }

    /// Walk predecessors back from `goal` and return the path start-first.
    fn path_to(&self, goal: usize) -> Vec<C> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            path.push(node.state.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

/// Find a shortest path from `start` to any goal state.
///
/// Runs until a goal is discovered or the reachable state space is
/// exhausted. An infinite state space with no reachable goal never
/// returns; use [`solve_with_config`] to bound such searches.
pub fn solve<C: Configuration>(start: C) -> Solution<C> {
    match search(start, |_, _| Ok::<(), Infallible>(())) {
        Ok(solution) => solution,
        Err(never) => match never {},
    }
}

/// [`solve`] with optional expansion and time limits.
///
/// Limits are checked before each expansion. A goal discovered before a
/// limit is hit is returned as a normal solution.
pub fn solve_with_config<C: Configuration>(
    start: C,
    config: &SolverConfig,
) -> Result<Solution<C>, SolveError> {
    if config.is_unbounded() {
        return Ok(solve(start));
    }

    let started = Instant::now();
    // A deadline past the end of representable time is no deadline
    let deadline = config
        .timeout
        .and_then(|timeout| started.checked_add(timeout));

    search(start, |expansions, unique_visited| {
        if let Some(limit) = config.max_expansions {
            if expansions >= limit {
                return Err(SolveError::ExpansionLimit {
                    limit,
                    unique_visited,
                });
            }
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Err(SolveError::Timeout {
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    unique_visited,
                });
            }
        }
        Ok(())
    })
}

/// The BFS loop. `budget` sees `(expansions, unique_visited)` before every
/// expansion and may stop the search with an error.
fn search<C, E, F>(start: C, mut budget: F) -> Result<Solution<C>, E>
where
    C: Configuration,
    F: FnMut(usize, usize) -> Result<(), E>,
{
    debug!(event = "search_start", start = %start);

    // Goals are detected on discovery, so the start needs its own check
    if start.is_solution() {
        debug!(event = "search_end", solved = true, unique_visited = 1);
        return Ok(Solution {
            path: vec![start],
            total_generated: 0,
            unique_visited: 1,
            expansions: 0,
        });
    }

    let mut frontier = Frontier::seeded(start);
    let mut total_generated = 0;
    let mut expansions = 0;
    let mut goal = None;

    while let Some(current) = frontier.pop() {
        budget(expansions, frontier.unique())?;
        expansions += 1;
        trace!(expansion = expansions, state = %frontier.state(current));

        let mut neighbors = frontier.state(current).neighbors().into_iter();
        for neighbor in neighbors.by_ref() {
            total_generated += 1;
            let is_goal = neighbor.is_solution();
            if let Some(id) = frontier.discover(neighbor, current) {
                if is_goal {
                    goal = Some(id);
                    break;
                }
            }
        }

        if goal.is_some() {
            // The rest of this expansion was still generated
            total_generated += neighbors.count();
            break;
        }
    }

    let path = goal.map(|id| frontier.path_to(id)).unwrap_or_default();
    let solution = Solution {
        path,
        total_generated,
        unique_visited: frontier.unique(),
        expansions,
    };

    debug!(
        event = "search_end",
        solved = solution.is_solved(),
        total_generated = solution.total_generated,
        unique_visited = solution.unique_visited,
        expansions = solution.expansions,
    );

    Ok(solution)
}
