//! Distance estimates used to guide the informed strategies.
//!
//! Every heuristic is a pure function of the agent position and the food
//! still on the grid. None of them look at the primary-before-secondary
//! eating order.

use serde::{Deserialize, Serialize};

use crate::GameState;

/// Selects which estimate an informed search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Manhattan distance to the farthest remaining item. Admissible.
    #[default]
    FarthestFood,
    /// Manhattan distance to the nearest remaining item.
    NearestFood,
    /// Straight-line distance to the nearest remaining item.
    EuclideanNearest,
}

impl Heuristic {
    pub fn estimate(self, state: &GameState) -> f64 {
        match self {
            Heuristic::FarthestFood => farthest_food(state),
            Heuristic::NearestFood => nearest_food(state),
            Heuristic::EuclideanNearest => euclidean_nearest(state),
        }
    }
}

pub fn farthest_food(state: &GameState) -> f64 {
    let agent = state.agent();
    state
        .food()
        .iter()
        .map(|f| agent.manhattan_distance(&f.position))
        .max()
        .unwrap_or(0) as f64
}

pub fn nearest_food(state: &GameState) -> f64 {
    let agent = state.agent();
    state
        .food()
        .iter()
        .map(|f| agent.manhattan_distance(&f.position))
        .min()
        .unwrap_or(0) as f64
}

pub fn euclidean_nearest(state: &GameState) -> f64 {
    let agent = state.agent();
    state
        .food()
        .iter()
        .map(|f| agent.euclidean_distance(&f.position))
        .min_by(f64::total_cmp)
        .unwrap_or(0.0)
}
