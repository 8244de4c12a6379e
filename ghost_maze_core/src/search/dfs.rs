use std::collections::HashSet;

use super::{Deadline, SearchOutcome, SearchStats, Solver, Strategy};
use crate::{Action, GameState};

/// Depth-first search over a LIFO stack.
///
/// Successors are pushed in reverse so they pop in `U, D, L, R` order. The
/// path found is not necessarily the shortest.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl Solver for DepthFirst {
    fn strategy(&self) -> Strategy {
        Strategy::Dfs
    }

    fn search(
        &self,
        start: &GameState,
        deadline: &Deadline,
        stats: &mut SearchStats,
    ) -> SearchOutcome {
        let mut visited = HashSet::from([start.canonical()]);
        let mut stack: Vec<(GameState, Vec<Action>)> = vec![(start.clone(), Vec::new())];

        while let Some((state, path)) = stack.pop() {
            if deadline.expired() {
                return SearchOutcome::TimedOut;
            }
            if state.is_goal() {
                return SearchOutcome::Solved(path);
            }

            stats.expanded += 1;
            for successor in state.successors().into_iter().rev() {
                stats.generated += 1;
                if visited.insert(successor.state.canonical()) {
                    let mut next_path = path.clone();
                    next_path.push(successor.action);
                    stats.enqueued += 1;
                    stack.push((successor.state, next_path));
                }
            }
        }

        SearchOutcome::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{Food, FoodKind, Position, map::Grid};

    fn run(start: &GameState) -> SearchOutcome {
        let mut stats = SearchStats::default();
        DepthFirst.search(start, &Deadline::after(Duration::from_secs(10)), &mut stats)
    }

    #[test]
    fn test_prefers_up_first() {
        // Food directly above and below; Up is tried first.
        let food = vec![
            Food::new(Position::new(0, 0), FoodKind::Primary),
            Food::new(Position::new(2, 0), FoodKind::Primary),
        ];
        let start = GameState::new(Grid::new(3, 1), Position::new(1, 0), vec![], food);
        assert_eq!(
            run(&start),
            SearchOutcome::Solved(vec![Action::Up, Action::Down, Action::Down])
        );
    }

    #[test]
    fn test_may_return_long_detour() {
        // Food two cells right; Down is explored before Right.
        let food = vec![Food::new(Position::new(0, 2), FoodKind::Primary)];
        let start = GameState::new(Grid::new(2, 3), Position::new(0, 0), vec![], food);
        let path = run(&start).into_path().unwrap();
        assert_eq!(
            path,
            vec![Action::Down, Action::Right, Action::Right, Action::Up]
        );
    }

    #[test]
    fn test_boxed_in_start_exhausts() {
        let walls = Grid::from_generator(3, 3, |pos| pos != Position::new(1, 1));
        let food = vec![Food::new(Position::new(1, 1), FoodKind::Secondary)];
        let start = GameState::new(walls, Position::new(1, 1), vec![], food);
        assert_eq!(run(&start), SearchOutcome::Exhausted);
    }
}
