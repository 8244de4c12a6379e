use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Heuristic, Strategy};

/// Time limit applied to a strategy with no explicit entry.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 200;
/// How far a ghost may wander from its center.
pub const DEFAULT_GHOST_RADIUS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid solver configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown strategy '{0}' (expected one of BFS, DFS, IDS, A*, Weighted A*)")]
    UnknownStrategy(String),
}

/// Configuration for the search engine and the map loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit per strategy, in seconds
    pub time_limits: BTreeMap<Strategy, u64>,
    /// Heuristic multiplier used by weighted A*
    pub weight: f64,
    /// Heuristic used by both informed strategies
    pub heuristic: Heuristic,
    /// Deepest limit iterative deepening will try
    pub ids_max_depth: usize,
    /// Oscillation radius given to every loaded ghost
    pub ghost_radius: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limits: Strategy::ALL
                .into_iter()
                .map(|strategy| (strategy, DEFAULT_TIME_LIMIT_SECS))
                .collect(),
            weight: 5.0,
            heuristic: Heuristic::FarthestFood,
            ids_max_depth: 1000,
            ghost_radius: DEFAULT_GHOST_RADIUS,
        }
    }
}

impl SolverConfig {
    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn time_limit(&self, strategy: Strategy) -> Duration {
        let secs = self
            .time_limits
            .get(&strategy)
            .copied()
            .unwrap_or(DEFAULT_TIME_LIMIT_SECS);
        Duration::from_secs(secs)
    }

    /// Sets every strategy's time limit to `secs` whole seconds.
    pub fn with_uniform_time_limit(mut self, secs: u64) -> Self {
        for strategy in Strategy::ALL {
            self.time_limits.insert(strategy, secs);
        }
        self
    }
}
