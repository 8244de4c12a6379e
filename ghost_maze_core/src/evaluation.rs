use std::{
    fmt,
    time::{Duration, Instant},
};

use tracing::error;

use crate::{
    GameState, SearchOutcome, SolverConfig, Strategy,
    search::{self, solver_for},
    trace,
};

/// Result classification for one strategy on one map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    Success { moves: usize },
    Timeout,
    NotFound,
    Error(String),
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationResult::Success { .. } => f.write_str("Success"),
            EvaluationResult::Timeout => f.write_str("Timeout"),
            EvaluationResult::NotFound => f.write_str("NotFound"),
            EvaluationResult::Error(_) => f.write_str("Error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationRow {
    pub strategy: Strategy,
    pub elapsed: Duration,
    pub result: EvaluationResult,
}

impl EvaluationRow {
    pub fn moves(&self) -> usize {
        match self.result {
            EvaluationResult::Success { moves } => moves,
            _ => 0,
        }
    }
}

/// Runs one strategy on its own copy of `start`, replays the result, and classifies it.
pub fn evaluate_strategy(
    strategy: Strategy,
    start: &GameState,
    config: &SolverConfig,
) -> EvaluationRow {
    let started = Instant::now();
    let solver = solver_for(strategy, config);
    let report = search::run(solver.as_ref(), &start.clone(), config.time_limit(strategy));

    let result = match report.outcome {
        SearchOutcome::Solved(path) => match trace::build_trace(start, &path) {
            Ok(_) => EvaluationResult::Success { moves: path.len() },
            Err(e) => {
                error!(%strategy, error = %e, "could not replay solution");
                EvaluationResult::Error(e.to_string())
            }
        },
        SearchOutcome::TimedOut => EvaluationResult::Timeout,
        SearchOutcome::Exhausted => EvaluationResult::NotFound,
    };

    EvaluationRow {
        strategy,
        elapsed: started.elapsed(),
        result,
    }
}

/// Runs every registered strategy, one after another, on `start`.
pub fn evaluate(start: &GameState, config: &SolverConfig) -> Vec<EvaluationRow> {
    Strategy::ALL
        .into_iter()
        .map(|strategy| evaluate_strategy(strategy, start, config))
        .collect()
}
