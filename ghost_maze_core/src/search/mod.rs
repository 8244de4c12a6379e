//! Graph-search strategies over [`GameState`].
//!
//! Every strategy only uses [`GameState::successors`], [`GameState::is_goal`]
//! and [`GameState::canonical`], polls its [`Deadline`] once per main-loop
//! iteration, and reports ordinary failure through [`SearchOutcome`] rather
//! than an error.

use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Action, GameState,
    config::{ConfigError, SolverConfig},
    trace::{self, Frame, TraceError},
};

mod astar;
mod bfs;
mod dfs;
mod ids;

pub use astar::BestFirst;
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use ids::IterativeDeepening;

/// The registry of available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "BFS")]
    Bfs,
    #[serde(rename = "DFS")]
    Dfs,
    #[serde(rename = "IDS")]
    Ids,
    #[serde(rename = "A*")]
    AStar,
    #[serde(rename = "Weighted A*")]
    WeightedAStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ids,
        Strategy::AStar,
        Strategy::WeightedAStar,
    ];

    /// The registry name, e.g. `"Weighted A*"`.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Ids => "IDS",
            Strategy::AStar => "A*",
            Strategy::WeightedAStar => "Weighted A*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "astar" | "a-star" => Some(Strategy::AStar),
            "wastar" | "weighted-astar" | "weighted_astar" => Some(Strategy::WeightedAStar),
            _ => None,
        };
        alias
            .or_else(|| {
                Strategy::ALL
                    .into_iter()
                    .find(|strategy| strategy.name().to_ascii_lowercase() == wanted)
            })
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// A wall-clock budget, started when constructed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn expired(&self) -> bool {
        self.started.elapsed() > self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Actions leading from the start state to a goal state.
    Solved(Vec<Action>),
    /// Every reachable state was explored without reaching a goal.
    Exhausted,
    /// The time limit ran out first.
    TimedOut,
}

impl SearchOutcome {
    /// Collapses the outcome to `Some(actions)` or `None` for any kind of failure.
    pub fn into_path(self) -> Option<Vec<Action>> {
        match self {
            SearchOutcome::Solved(path) => Some(path),
            SearchOutcome::Exhausted | SearchOutcome::TimedOut => None,
        }
    }

    pub fn path(&self) -> Option<&[Action]> {
        match self {
            SearchOutcome::Solved(path) => Some(path),
            SearchOutcome::Exhausted | SearchOutcome::TimedOut => None,
        }
    }
}

/// Counters collected while a strategy runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: usize,
    /// Successor states produced.
    pub generated: usize,
    /// Successors actually added to the frontier.
    pub enqueued: usize,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// A search strategy. Implementations must be deterministic.
pub trait Solver {
    fn strategy(&self) -> Strategy;

    /// Searches from `start` until a goal is found, the space is exhausted,
    /// or `deadline` expires.
    fn search(&self, start: &GameState, deadline: &Deadline, stats: &mut SearchStats)
    -> SearchOutcome;
}

/// Instantiates the solver registered under `strategy`.
pub fn solver_for(strategy: Strategy, config: &SolverConfig) -> Box<dyn Solver> {
    match strategy {
        Strategy::Bfs => Box::new(BreadthFirst),
        Strategy::Dfs => Box::new(DepthFirst),
        Strategy::Ids => Box::new(IterativeDeepening::new(config.ids_max_depth)),
        Strategy::AStar => Box::new(BestFirst::a_star(config.heuristic)),
        Strategy::WeightedAStar => Box::new(BestFirst::weighted(config.heuristic, config.weight)),
    }
}

/// Runs `solver` from `start` with the given time limit and logs the result.
pub fn run(solver: &dyn Solver, start: &GameState, time_limit: Duration) -> SearchReport {
    let strategy = solver.strategy();
    info!(%strategy, ?time_limit, "starting search");

    let deadline = Deadline::after(time_limit);
    let mut stats = SearchStats::default();
    let outcome = solver.search(start, &deadline, &mut stats);
    let elapsed = deadline.elapsed();

    match &outcome {
        SearchOutcome::Solved(path) => info!(
            %strategy,
            moves = path.len(),
            expanded = stats.expanded,
            ?elapsed,
            "goal found"
        ),
        SearchOutcome::Exhausted => info!(
            %strategy,
            expanded = stats.expanded,
            ?elapsed,
            "search space exhausted, no solution"
        ),
        SearchOutcome::TimedOut => warn!(
            %strategy,
            expanded = stats.expanded,
            ?elapsed,
            "time limit reached"
        ),
    }

    SearchReport {
        strategy,
        outcome,
        stats,
        elapsed,
    }
}

/// Runs the strategy registered under `strategy` with its configured time limit.
pub fn solve(strategy: Strategy, start: &GameState, config: &SolverConfig) -> SearchReport {
    let solver = solver_for(strategy, config);
    run(solver.as_ref(), start, config.time_limit(strategy))
}

/// Solves and replays the result into renderer frames; `None` when no solution was found.
pub fn solve_to_frames(
    strategy: Strategy,
    start: &GameState,
    config: &SolverConfig,
) -> Result<Option<Vec<Frame>>, TraceError> {
    match solve(strategy, start, config).outcome.into_path() {
        Some(path) => trace::build_trace(start, &path).map(Some),
        None => Ok(None),
    }
}
