use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
};

use super::{Deadline, SearchOutcome, SearchStats, Solver, Strategy};
use crate::{Action, GameState, Heuristic};

/// Best-first search scored by `f = g + weight * h`.
///
/// With `weight == 1` this is A*; larger weights give weighted A*, which
/// trades optimality for fewer expansions.
#[derive(Debug, Clone, Copy)]
pub struct BestFirst {
    strategy: Strategy,
    heuristic: Heuristic,
    weight: f64,
}

/// An open-list entry. Superseded entries for the same state stay in the
/// heap and are skipped when popped.
struct OpenEntry {
    f: f64,
    /// Insertion order; the earliest entry wins among equal `f`.
    seq: usize,
    g: u32,
    state: GameState,
    path: Vec<Action>,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl BestFirst {
    pub fn a_star(heuristic: Heuristic) -> Self {
        Self {
            strategy: Strategy::AStar,
            heuristic,
            weight: 1.0,
        }
    }

    pub fn weighted(heuristic: Heuristic, weight: f64) -> Self {
        Self {
            strategy: Strategy::WeightedAStar,
            heuristic,
            weight,
        }
    }

    fn score(&self, g: u32, state: &GameState) -> f64 {
        f64::from(g) + self.weight * self.heuristic.estimate(state)
    }
}

impl Solver for BestFirst {
    fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn search(
        &self,
        start: &GameState,
        deadline: &Deadline,
        stats: &mut SearchStats,
    ) -> SearchOutcome {
        let mut best_g = HashMap::from([(start.canonical(), 0u32)]);
        let mut finalized = HashSet::new();
        let mut open = BinaryHeap::new();
        let mut seq = 0usize;

        open.push(OpenEntry {
            f: self.score(0, start),
            seq,
            g: 0,
            state: start.clone(),
            path: Vec::new(),
        });

        while let Some(entry) = open.pop() {
            if deadline.expired() {
                return SearchOutcome::TimedOut;
            }
            if !finalized.insert(entry.state.canonical()) {
                continue;
            }
            if entry.state.is_goal() {
                return SearchOutcome::Solved(entry.path);
            }

            stats.expanded += 1;
            for successor in entry.state.successors() {
                stats.generated += 1;
                let g = entry.g + successor.cost;
                let key = successor.state.canonical();
                if best_g.get(&key).is_some_and(|&known| known <= g) {
                    continue;
                }
                best_g.insert(key, g);

                seq += 1;
                stats.enqueued += 1;
                let mut path = entry.path.clone();
                path.push(successor.action);
                open.push(OpenEntry {
                    f: self.score(g, &successor.state),
                    seq,
                    g,
                    state: successor.state,
                    path,
                });
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

    fn run(solver: BestFirst, start: &GameState) -> (SearchOutcome, SearchStats) {
        let mut stats = SearchStats::default();
        let outcome = solver.search(start, &Deadline::after(Duration::from_secs(10)), &mut stats);
        (outcome, stats)
    }

    fn corridor_start() -> GameState {
        // P . . . .
        // . W W W .
        // . . . . A
        let walls = Grid::from_generator(3, 5, |pos| pos.row == 1 && (1..=3).contains(&pos.col));
        let food = vec![Food::new(Position::new(2, 4), FoodKind::Primary)];
        GameState::new(walls, Position::new(0, 0), vec![], food)
    }

    #[test]
    fn test_open_entries_pop_by_f_then_insertion() {
        let state = GameState::new(Grid::new(1, 1), Position::new(0, 0), vec![], vec![]);
        let entry = |f: f64, seq: usize| OpenEntry {
            f,
            seq,
            g: 0,
            state: state.clone(),
            path: Vec::new(),
        };
        let mut heap = BinaryHeap::from(vec![entry(3.0, 0), entry(1.0, 2), entry(1.0, 1)]);
        assert_eq!(heap.pop().map(|e| e.seq), Some(1));
        assert_eq!(heap.pop().map(|e| e.seq), Some(2));
        assert_eq!(heap.pop().map(|e| e.seq), Some(0));
    }

    #[test]
    fn test_a_star_finds_optimal_length() {
        let (outcome, _) = run(BestFirst::a_star(Heuristic::FarthestFood), &corridor_start());
        assert_eq!(outcome.into_path().map(|p| p.len()), Some(6));
    }

    #[test]
    fn test_weighted_expands_no_more_than_plain() {
        let start = corridor_start();
        let (plain, plain_stats) = run(BestFirst::a_star(Heuristic::FarthestFood), &start);
        let (weighted, weighted_stats) =
            run(BestFirst::weighted(Heuristic::FarthestFood, 5.0), &start);
        assert!(plain.path().is_some());
        assert!(weighted.path().is_some());
        assert!(weighted_stats.expanded <= plain_stats.expanded);
    }

    #[test]
    fn test_only_improving_entries_are_enqueued() {
        let food = vec![Food::new(Position::new(3, 3), FoodKind::Primary)];
        let start = GameState::new(Grid::new(4, 4), Position::new(0, 0), vec![], food);
        let (outcome, stats) = run(BestFirst::a_star(Heuristic::FarthestFood), &start);
        assert_eq!(outcome.into_path().map(|p| p.len()), Some(6));
        // Stepping back to an expanded parent never beats its known cost.
        assert!(stats.enqueued < stats.generated);
        assert!(stats.enqueued < 2 * 16);
    }

    #[test]
    fn test_unreachable_food_exhausts() {
        let walls = Grid::from_generator(2, 3, |pos| pos.col == 1);
        let food = vec![Food::new(Position::new(1, 2), FoodKind::Primary)];
        let start = GameState::new(walls, Position::new(0, 0), vec![], food);
        let (outcome, _) = run(BestFirst::a_star(Heuristic::NearestFood), &start);
        assert_eq!(outcome, SearchOutcome::Exhausted);
    }
}
