use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod evaluation;
pub mod ghost;
pub mod heuristics;
pub mod loader;
pub mod map;
pub mod search;
pub mod state;
pub mod trace;

pub use config::SolverConfig;
pub use ghost::Ghost;
pub use heuristics::Heuristic;
pub use search::{SearchOutcome, SearchReport, Strategy};
pub use state::{CanonicalState, GameState, Successor};
pub use trace::{FoodRecord, Frame};

/// Represents a grid coordinate as (row, col).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by the given deltas.
    ///
    /// Returns `None` when the shift would leave the non-negative quadrant.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// Returns manhattan distance between two positions
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns the straight-line distance between two positions.
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let d_row = self.row.abs_diff(other.row) as f64;
        let d_col = self.col.abs_diff(other.col) as f64;
        d_row.hypot(d_col)
    }
}

/// A move the agent can make. Declaration order is the expansion priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "D")]
    Down,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Action {
    /// All actions in `U, D, L, R` priority order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Row and column delta of the move.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Action::Up => 'U',
            Action::Down => 'D',
            Action::Left => 'L',
            Action::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.letter() == letter)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Renders an action sequence as a compact letter string, e.g. `"RRDL"`.
pub fn actions_to_string(actions: &[Action]) -> String {
    actions.iter().map(|a| a.letter()).collect()
}

/// The axis a ghost patrols along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "H")]
    Horizontal,
    #[serde(rename = "V")]
    Vertical,
}

impl Axis {
    pub const fn letter(self) -> char {
        match self {
            Axis::Horizontal => 'H',
            Axis::Vertical => 'V',
        }
    }
}

/// The type tag of a food item.
///
/// Ordering matters: an item may only be eaten when no item of a lower kind
/// remains on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    #[serde(rename = "A")]
    Primary,
    #[serde(rename = "B")]
    Secondary,
}

impl FoodKind {
    pub const fn letter(self) -> char {
        match self {
            FoodKind::Primary => 'A',
            FoodKind::Secondary => 'B',
        }
    }
}

/// A food item still present on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub const fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_offset() {
        let pos = Position::new(2, 2);
        assert_eq!(pos.offset(-1, 0), Some(Position::new(1, 2)));
        assert_eq!(pos.offset(0, 3), Some(Position::new(2, 5)));
        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
        assert_eq!(Position::new(0, 0).offset(0, -1), None);
    }

    #[test]
    fn test_distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert!((a.euclidean_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_action_letters() {
        assert_eq!(actions_to_string(&Action::ALL), "UDLR");
        for action in Action::ALL {
            assert_eq!(Action::from_letter(action.letter()), Some(action));
        }
        assert_eq!(Action::from_letter('X'), None);
    }

    #[test]
    fn test_food_kind_order() {
        assert!(FoodKind::Primary < FoodKind::Secondary);
    }
}
