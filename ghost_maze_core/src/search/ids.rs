use std::{collections::HashSet, rc::Rc};

use tracing::debug;

use super::{Deadline, SearchOutcome, SearchStats, Solver, Strategy};
use crate::{Action, CanonicalState, GameState};

/// Iterative-deepening depth-first search.
///
/// Runs depth-limited passes with limits `1, 2, 3, ...`. Each pass is an
/// explicit stack; a state is skipped only if it already lies on the current
/// path, so it may be revisited through a different path.
#[derive(Debug, Clone, Copy)]
pub struct IterativeDeepening {
    max_depth: usize,
}

/// How a single depth-limited pass ended.
enum Pass {
    Found(Vec<Action>),
    /// Some branch was cut short by the depth limit.
    CutOff,
    /// No branch reached the limit: the whole reachable space was enumerated.
    Exhausted,
    TimedOut,
}

struct Frame {
    state: GameState,
    path: Vec<Action>,
    budget: usize,
    /// Canonical states of every ancestor on the current path.
    ancestors: Rc<HashSet<CanonicalState>>,
}

impl IterativeDeepening {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn depth_limited(
        start: &GameState,
        limit: usize,
        deadline: &Deadline,
        stats: &mut SearchStats,
    ) -> Pass {
        let mut stack = vec![Frame {
            state: start.clone(),
            path: Vec::new(),
            budget: limit,
            ancestors: Rc::new(HashSet::new()),
        }];
        let mut cut_off = false;

        while let Some(frame) = stack.pop() {
            if deadline.expired() {
                return Pass::TimedOut;
            }
            if frame.state.is_goal() {
                return Pass::Found(frame.path);
            }
            if frame.budget == 0 {
                cut_off = true;
                continue;
            }

            stats.expanded += 1;
            let mut on_path = (*frame.ancestors).clone();
            on_path.insert(frame.state.canonical());
            let on_path = Rc::new(on_path);

            for successor in frame.state.successors().into_iter().rev() {
                stats.generated += 1;
                if on_path.contains(&successor.state.canonical()) {
                    continue;
                }
                let mut path = frame.path.clone();
                path.push(successor.action);
                stats.enqueued += 1;
                stack.push(Frame {
                    state: successor.state,
                    path,
                    budget: frame.budget - 1,
                    ancestors: Rc::clone(&on_path),
                });
            }
        }

        if cut_off { Pass::CutOff } else { Pass::Exhausted }
    }
}

impl Solver for IterativeDeepening {
    fn strategy(&self) -> Strategy {
        Strategy::Ids
    }

    fn search(
        &self,
        start: &GameState,
        deadline: &Deadline,
        stats: &mut SearchStats,
    ) -> SearchOutcome {
        for limit in 1..=self.max_depth {
            if deadline.expired() {
                return SearchOutcome::TimedOut;
            }
            debug!(limit, expanded = stats.expanded, "ids: starting depth-limited pass");

            match Self::depth_limited(start, limit, deadline, stats) {
                Pass::Found(path) => return SearchOutcome::Solved(path),
                Pass::CutOff => {}
                Pass::Exhausted => return SearchOutcome::Exhausted,
                Pass::TimedOut => return SearchOutcome::TimedOut,
            }
        }

        debug!(max_depth = self.max_depth, "ids: depth cap reached");
        SearchOutcome::Exhausted
    }
}
