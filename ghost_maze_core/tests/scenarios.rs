use std::time::Duration;

use ghost_maze_core::{
    Action, FoodKind, SearchOutcome, SolverConfig, Strategy,
    loader::load_game_from_string,
    search::{self, BreadthFirst, solve, solve_to_frames},
    trace::{build_trace, replay},
};

fn quick_config() -> SolverConfig {
    SolverConfig::default().with_uniform_time_limit(30)
}

/// 5x5, no walls, primary food three cells east of the agent.
const EAST_FOOD: &str = "     \n     \nP  A \n     \n     ";

#[test]
fn straight_east_food_is_three_right_moves() {
    let start = load_game_from_string(EAST_FOOD, 2).unwrap();
    let config = quick_config();

    for strategy in [
        Strategy::Bfs,
        Strategy::Ids,
        Strategy::AStar,
        Strategy::WeightedAStar,
    ] {
        let frames = solve_to_frames(strategy, &start, &config)
            .unwrap()
            .unwrap_or_else(|| panic!("{strategy} found no path"));
        let moves: Vec<_> = frames.iter().skip(1).filter_map(|f| f.action).collect();
        assert_eq!(moves, vec![Action::Right; 3], "{strategy}");
        assert_eq!(frames.len(), 4);
        let last = frames.last().unwrap();
        assert_eq!(last.food.len(), 1);
        assert!(!last.food[0].exists, "{strategy}");
    }
}

#[test]
fn depth_first_on_east_food_still_reaches_goal() {
    // Up is always tried first, so depth-first wanders before finding the food.
    let start = load_game_from_string(EAST_FOOD, 2).unwrap();
    let path = solve(Strategy::Dfs, &start, &quick_config())
        .outcome
        .into_path()
        .unwrap();
    assert!(path.len() >= 3);
    assert_eq!(path[0], Action::Up);
    assert!(replay(&start, &path).unwrap().is_goal());

    let frames = build_trace(&start, &path).unwrap();
    assert!(!frames.last().unwrap().food[0].exists);
}

#[test]
fn lone_secondary_food_eaten_on_first_contact() {
    let start = load_game_from_string("P B", 2).unwrap();
    assert_eq!(start.next_food_kind(), Some(FoodKind::Secondary));
    let report = solve(Strategy::Bfs, &start, &quick_config());
    assert_eq!(
        report.outcome,
        SearchOutcome::Solved(vec![Action::Right, Action::Right])
    );
}

#[test]
fn secondary_must_wait_for_primary() {
    // The secondary item sits on the way; it only counts on the way back.
    let start = load_game_from_string("PB A", 2).unwrap();
    let path = solve(Strategy::Bfs, &start, &quick_config())
        .outcome
        .into_path()
        .unwrap();
    assert_eq!(path.len(), 5);
    let frames = build_trace(&start, &path).unwrap();
    // After stepping onto the secondary item first, it is still there.
    assert!(frames[1].food[0].exists);
    assert!(frames.last().unwrap().food.iter().all(|f| !f.exists));
}

#[test]
fn ghost_blocks_corridor_until_it_moves_away() {
    // The ghost patrols the middle row; the agent must time its crossing.
    let map = "\
WWWWWWW
WP    W
WWW WWW
W  H  W
WWW WWW
W  A  W
WWWWWWW";
    let start = load_game_from_string(map, 2).unwrap();
    let path = solve(Strategy::Bfs, &start, &quick_config())
        .outcome
        .into_path()
        .unwrap();
    let frames = build_trace(&start, &path).unwrap();
    for pair in frames.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        for (g_before, g_after) in before.ghosts.iter().zip(&after.ghosts) {
            assert_ne!(after.agent, *g_after);
            assert!(!(after.agent == *g_before && before.agent == *g_after));
        }
    }
    assert!(frames.last().unwrap().food.iter().all(|f| !f.exists));
}

#[test]
fn boxed_in_agent_is_not_found_by_every_strategy() {
    let start = load_game_from_string("WWWWW\nWPWAW\nWWWWW", 2).unwrap();
    let config = quick_config();
    for strategy in Strategy::ALL {
        assert_eq!(
            solve(strategy, &start, &config).outcome,
            SearchOutcome::Exhausted,
            "{strategy}"
        );
        assert_eq!(solve_to_frames(strategy, &start, &config).unwrap(), None);
    }
}

#[test]
fn weighting_the_heuristic_cuts_expansions() {
    let start = load_game_from_string(include_str!("../../maps/map03.txt"), 2).unwrap();
    let config = quick_config();
    let plain = solve(Strategy::AStar, &start, &config);
    let weighted = solve(Strategy::WeightedAStar, &start, &config);
    let plain_moves = plain.outcome.path().map(<[Action]>::len).unwrap();
    let weighted_moves = weighted.outcome.path().map(<[Action]>::len).unwrap();
    assert!(plain_moves <= weighted_moves);
    assert!(weighted.stats.expanded < plain.stats.expanded);
}

#[test]
fn zero_time_limit_times_out() {
    let map = "\
P        A
 W W W W  
A   B    A
  W   W  B
B    A    ";
    let start = load_game_from_string(map, 2).unwrap();
    let report = search::run(&BreadthFirst, &start, Duration::ZERO);
    assert_eq!(report.outcome, SearchOutcome::TimedOut);
    assert_eq!(report.outcome.into_path(), None);
}
