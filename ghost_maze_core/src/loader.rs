use crate::{
    Axis, Food, FoodKind, GameState, Ghost, Position,
    map::{Grid, WallMask},
};

/// Represents errors that can occur while parsing a map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Map is empty.")]
    Empty,
    #[error("Unknown map character '{ch}' at row {row}, column {col}.")]
    UnknownCharacter { ch: char, row: usize, col: usize },
    #[error("No agent start position ('P') found in map.")]
    MissingAgent,
    #[error("Multiple agent start positions ('P') found: {first:?} and {second:?}.")]
    MultipleAgents { first: Position, second: Position },
}

/// Builds the start state from a character map.
///
/// Codes: `W` wall, `P` agent, `H`/`V` ghost patrolling horizontally or
/// vertically, `A` primary food, `B` secondary food, space for floor.
/// Empty lines are skipped; a line of spaces is a row of floor. Short rows
/// are padded with floor. Ghosts and food are listed in row-major order.
pub fn load_game_from_string(map_string: &str, ghost_radius: usize) -> Result<GameState, LoadError> {
    let rows: Vec<Vec<char>> = map_string
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect();
    if rows.is_empty() {
        return Err(LoadError::Empty);
    }

    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut walls: WallMask = Grid::new(height, width);
    let mut agent: Option<Position> = None;
    let mut ghosts = Vec::new();
    let mut food = Vec::new();

    for (row, line) in rows.iter().enumerate() {
        for (col, &ch) in line.iter().enumerate() {
            let pos = Position::new(row, col);
            match ch {
                ' ' => {}
                'W' => walls[pos] = true,
                'P' => {
                    if let Some(first) = agent {
                        return Err(LoadError::MultipleAgents { first, second: pos });
                    }
                    agent = Some(pos);
                }
                'H' => ghosts.push(Ghost::new(pos, Axis::Horizontal, ghost_radius)),
                'V' => ghosts.push(Ghost::new(pos, Axis::Vertical, ghost_radius)),
                'A' => food.push(Food::new(pos, FoodKind::Primary)),
                'B' => food.push(Food::new(pos, FoodKind::Secondary)),
                unknown => {
                    return Err(LoadError::UnknownCharacter {
                        ch: unknown,
                        row,
                        col,
                    });
                }
            }
        }
    }

    let agent = agent.ok_or(LoadError::MissingAgent)?;
    Ok(GameState::new(walls, agent, ghosts, food))
}
