//! CLI entry point for the puzzle solver.
//!
//! Usage:
//!   bfs-puzzles clock <hours> <start> <end> [options]
//!   bfs-puzzles water <amount> <capacity>... [options]
//!
//! Options:
//!   --max-expansions <n>  Stop after expanding this many states
//!   --timeout <seconds>   Stop after this much search time
//!   --json                Print a JSON report instead of text
//!
//! Exit status: 0 solved, 1 no solution or search stopped by a limit,
//! 2 invalid puzzle arguments, 3 report could not be written.
//!
//! Set RUST_LOG (e.g. `RUST_LOG=bfs_puzzles=debug`) for search logs on stderr.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use bfs_puzzles::{
    solve_with_config, Clock, Configuration, PuzzleError, Solution, SolveError, SolverConfig, Water,
};

#[derive(Parser)]
#[command(name = "bfs-puzzles")]
#[command(about = "Shortest-path solver for clock and water bucket puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move a clock hand from START to END one hour at a time
    Clock {
        /// Number of hours on the clock
        hours: u32,

        /// Starting hour
        start: u32,

        /// Goal hour
        end: u32,

        #[command(flatten)]
        search: SearchArgs,
    },
    /// Fill, empty and pour buckets until one holds AMOUNT
    Water {
        /// Amount of water wanted in some bucket
        amount: u32,

        /// Bucket capacities
        #[arg(required = true, value_name = "CAPACITY")]
        capacities: Vec<u32>,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Maximum number of states to expand
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Maximum search time in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_expansions: self.max_expansions,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Output format for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput<'a, P> {
    puzzle: &'a P,
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_configs: Option<usize>,
    unique_configs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    expansions: Option<usize>,
    time_elapsed_ms: u64,
}

impl<'a, P> SolveOutput<'a, P> {
    fn from_result<C: Configuration>(
        puzzle: &'a P,
        result: Result<Solution<C>, SolveError>,
        time_elapsed_ms: u64,
    ) -> Self {
        match result {
            Ok(solution) => SolveOutput {
                puzzle,
                solved: solution.is_solved(),
                reason: None,
                steps: solution.path.iter().map(|c| c.describe()).collect(),
                total_configs: Some(solution.total_generated),
                unique_configs: solution.unique_visited,
                expansions: Some(solution.expansions),
                time_elapsed_ms,
            },
            Err(e) => SolveOutput {
                puzzle,
                solved: false,
                reason: Some(e.to_string()),
                steps: Vec::new(),
                total_configs: None,
                unique_configs: e.unique_visited(),
                expansions: None,
                time_elapsed_ms,
            },
        }
    }

    fn exit_status(&self) -> u8 {
        if self.solved {
            EXIT_SOLVED
        } else {
            EXIT_UNSOLVED
        }
    }
}

const EXIT_SOLVED: u8 = 0;
const EXIT_UNSOLVED: u8 = 1;
const EXIT_INVALID: u8 = 2;
const EXIT_OUTPUT: u8 = 3;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Clock {
            hours,
            start,
            end,
            search,
        } => {
            let clock = match Clock::new(hours, start, end) {
                Ok(clock) => clock,
                Err(e) => return invalid_puzzle(e),
            };
            let header = format!("Hours: {hours}, Start: {start}, End: {end}");
            run(&clock, &header, clock.start(), &search)
        }
        Commands::Water {
            amount,
            capacities,
            search,
        } => {
            let header = format!("Amount: {amount}, Buckets: {capacities:?}");
            let water = match Water::new(amount, capacities) {
                Ok(water) => water,
                Err(e) => return invalid_puzzle(e),
            };
            run(&water, &header, water.start(), &search)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn invalid_puzzle(error: PuzzleError) -> ExitCode {
    eprintln!("Error: {error}");
    ExitCode::from(EXIT_INVALID)
}

fn run<P: Serialize, C: Configuration>(
    puzzle: &P,
    header: &str,
    start: C,
    args: &SearchArgs,
) -> ExitCode {
    let started = Instant::now();
    let result = solve_with_config(start, &args.solver_config());
    let time_elapsed_ms = started.elapsed().as_millis() as u64;

    if let Err(e) = &result {
        warn!(event = "search_stopped", error = %e);
    }
    let output = SolveOutput::from_result(puzzle, result, time_elapsed_ms);

    if args.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing result: {e}");
                return ExitCode::from(EXIT_OUTPUT);
            }
        }
    } else {
        print_text(header, &output);
    }

    ExitCode::from(output.exit_status())
}

fn print_text<P>(header: &str, output: &SolveOutput<'_, P>) {
    println!("{header}");
    if let Some(total) = output.total_configs {
        println!("Total configs: {total}");
    }
    println!("Unique configs: {}", output.unique_configs);

    if let Some(reason) = &output.reason {
        println!("Search stopped: {reason}");
    } else if output.steps.is_empty() {
        println!("No solution");
    }
    for (i, step) in output.steps.iter().enumerate() {
        println!("Step {i}: {step}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfs_puzzles::solve;
    use serde_json::json;

    fn report<P: Serialize>(output: &SolveOutput<'_, P>) -> serde_json::Value {
        serde_json::to_value(output).unwrap()
    }

    #[test]
    fn test_solved_report() {
        let clock = Clock::new(12, 3, 5).unwrap();
        let output = SolveOutput::from_result(&clock, Ok(solve(clock.start())), 4);

        assert_eq!(output.exit_status(), EXIT_SOLVED);
        assert_eq!(
            report(&output),
            json!({
                "puzzle": { "hours": 12, "start": 3, "end": 5 },
                "solved": true,
                "steps": ["3", "4", "5"],
                "totalConfigs": 6,
                "uniqueConfigs": 5,
                "expansions": 3,
                "timeElapsedMs": 4,
            })
        );
    }

    #[test]
    fn test_unsolved_report() {
        let water = Water::new(5, vec![2, 6]).unwrap();
        let output = SolveOutput::from_result(&water, Ok(solve(water.start())), 0);

        assert_eq!(output.exit_status(), EXIT_UNSOLVED);
        let value = report(&output);
        assert_eq!(value["solved"], json!(false));
        assert_eq!(value["steps"], json!([]));
        assert_eq!(value["uniqueConfigs"], json!(8));
        assert!(value.get("reason").is_none());
        assert!(value.get("totalConfigs").is_some());
    }

    #[test]
    fn test_limit_hit_report() {
        let clock = Clock::new(12, 3, 9).unwrap();
        let config = SolverConfig {
            max_expansions: Some(2),
            ..Default::default()
        };
        let output =
            SolveOutput::from_result(&clock, solve_with_config(clock.start(), &config), 0);

        assert_eq!(output.exit_status(), EXIT_UNSOLVED);
        let value = report(&output);
        assert_eq!(value["solved"], json!(false));
        assert_eq!(value["uniqueConfigs"], json!(4));
        assert!(value["reason"]
            .as_str()
            .is_some_and(|r| r.starts_with("expansion limit of 2")));
        assert!(value.get("totalConfigs").is_none());
        assert!(value.get("expansions").is_none());
    }

    #[test]
    fn test_exit_statuses_are_distinct() {
        let statuses = [EXIT_SOLVED, EXIT_UNSOLVED, EXIT_INVALID, EXIT_OUTPUT];
        for (i, a) in statuses.iter().enumerate() {
            assert!(statuses[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn test_search_args_map_to_config() {
        let args = SearchArgs {
            max_expansions: Some(10),
            timeout: Some(u64::MAX),
            json: false,
        };
        let config = args.solver_config();
        assert_eq!(config.max_expansions, Some(10));
        assert_eq!(config.timeout, Some(Duration::from_secs(u64::MAX)));
    }

    #[test]
    fn test_cli_parses_water() {
        let cli = Cli::try_parse_from(["bfs-puzzles", "water", "2", "5", "3", "--json"]).unwrap();
        match cli.command {
            Commands::Water {
                amount,
                capacities,
                search,
            } => {
                assert_eq!(amount, 2);
                assert_eq!(capacities, vec![5, 3]);
                assert!(search.json);
            }
            Commands::Clock { .. } => panic!("expected water subcommand"),
        }
    }

    #[test]
    fn test_cli_requires_a_bucket() {
        assert!(Cli::try_parse_from(["bfs-puzzles", "water", "2"]).is_err());
    }
}
