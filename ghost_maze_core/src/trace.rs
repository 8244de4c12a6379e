//! Replays a found action sequence into renderer-ready frames.
//!
//! Intermediate states are re-derived from the start state instead of being
//! kept by the search. Every frame has the same shape: one agent position,
//! one position per ghost, and one record per food item of the start state,
//! in the start state's order.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Action, Food, FoodKind, GameState, Position};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    #[error("replay desync at step {step}: action '{action}' is not a legal move")]
    Desync { step: usize, action: Action },
}

/// A food item as shown in a frame, eaten or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodRecord {
    pub position: Position,
    pub kind: FoodKind,
    pub exists: bool,
}

/// The dynamic contents of the board after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// The move that led here; `None` on the initial frame.
    pub action: Option<Action>,
    pub agent: Position,
    pub ghosts: Vec<Position>,
    pub food: Vec<FoodRecord>,
}

impl Frame {
    fn capture(state: &GameState, original_food: &[Food]) -> Self {
        let mut remaining: HashMap<(Position, FoodKind), usize> = HashMap::new();
        for food in state.food() {
            *remaining.entry((food.position, food.kind)).or_default() += 1;
        }

        let food = original_food
            .iter()
            .map(|item| {
                let exists = match remaining.get_mut(&(item.position, item.kind)) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        true
                    }
                    _ => false,
                };
                FoodRecord {
                    position: item.position,
                    kind: item.kind,
                    exists,
                }
            })
            .collect();

        Frame {
            action: state.last_action(),
            agent: state.agent(),
            ghosts: state.ghosts().iter().map(|g| g.position).collect(),
            food,
        }
    }
}

/// Applies one action by picking the successor carrying that action.
pub fn step(state: &GameState, action: Action, index: usize) -> Result<GameState, TraceError> {
    state
        .successors()
        .into_iter()
        .find(|successor| successor.action == action)
        .map(|successor| successor.state)
        .ok_or(TraceError::Desync {
            step: index,
            action,
        })
}

/// Replays `actions` from `start` and returns the final state.
pub fn replay(start: &GameState, actions: &[Action]) -> Result<GameState, TraceError> {
    actions
        .iter()
        .enumerate()
        .try_fold(start.clone(), |state, (index, &action)| {
            step(&state, action, index)
        })
}

/// Builds `actions.len() + 1` frames: the start position followed by one frame per move.
pub fn build_trace(start: &GameState, actions: &[Action]) -> Result<Vec<Frame>, TraceError> {
    let original_food = start.food();
    let mut frames = Vec::with_capacity(actions.len() + 1);
    let mut initial = Frame::capture(start, original_food);
    initial.action = None;
    frames.push(initial);

    let mut state = start.clone();
    for (index, &action) in actions.iter().enumerate() {
        state = step(&state, action, index)?;
        frames.push(Frame::capture(&state, original_food));
    }

    Ok(frames)
}
