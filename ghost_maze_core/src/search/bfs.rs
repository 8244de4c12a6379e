use std::collections::{HashSet, VecDeque};

use super::{Deadline, SearchOutcome, SearchStats, Solver, Strategy};
use crate::{Action, GameState};

/// Breadth-first search. Returns a shortest action sequence.
///
/// States are marked visited when enqueued, so each canonical state enters
/// the queue at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl Solver for BreadthFirst {
    fn strategy(&self) -> Strategy {
        Strategy::Bfs
    }

    fn search(
        &self,
        start: &GameState,
        deadline: &Deadline,
        stats: &mut SearchStats,
    ) -> SearchOutcome {
        let mut visited = HashSet::from([start.canonical()]);
        let mut frontier: VecDeque<(GameState, Vec<Action>)> =
            VecDeque::from([(start.clone(), Vec::new())]);

        while let Some((state, path)) = frontier.pop_front() {
            if deadline.expired() {
                return SearchOutcome::TimedOut;
            }
            if state.is_goal() {
                return SearchOutcome::Solved(path);
            }

            stats.expanded += 1;
            for successor in state.successors() {
                stats.generated += 1;
                if visited.insert(successor.state.canonical()) {
                    let mut next_path = path.clone();
                    next_path.push(successor.action);
                    stats.enqueued += 1;
                    frontier.push_back((successor.state, next_path));
                }
            }
        }

        SearchOutcome::Exhausted
    }
}
