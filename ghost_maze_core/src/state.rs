use std::{fmt, sync::Arc};

use crate::{
    Action, Axis, Food, FoodKind, Ghost, Position,
    map::{Grid, WallMask},
};

/// The order-normalized identity of a search node.
///
/// Two states are the same node iff their canonical states are equal. Eaten
/// food is absent rather than flagged, so different consumption orders that
/// leave the same board collapse to one node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalState {
    agent: Position,
    ghosts: Vec<(Position, Axis, isize)>,
    food: Vec<(Position, FoodKind)>,
}

/// One legal move out of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub state: GameState,
    pub action: Action,
    pub cost: u32,
}

/// An immutable snapshot of the board: walls, agent, ghosts and remaining food.
///
/// Successors are independent values; the wall mask is shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    walls: Arc<WallMask>,
    agent: Position,
    ghosts: Vec<Ghost>,
    food: Vec<Food>,
    last_action: Option<Action>,
}

impl GameState {
    pub fn new(walls: WallMask, agent: Position, ghosts: Vec<Ghost>, food: Vec<Food>) -> Self {
        Self {
            walls: Arc::new(walls),
            agent,
            ghosts,
            food,
            last_action: None,
        }
    }

    pub fn walls(&self) -> &WallMask {
        &self.walls
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    /// Food items still on the grid, in their original relative order.
    pub fn food(&self) -> &[Food] {
        &self.food
    }

    /// The move that produced this state, `None` for a loaded start state.
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// True once every food item has been eaten.
    pub fn is_goal(&self) -> bool {
        self.food.is_empty()
    }

    /// The kind that must be eaten next: the lowest remaining kind, or `None` when finished.
    pub fn next_food_kind(&self) -> Option<FoodKind> {
        self.food.iter().map(|f| f.kind).min()
    }

    pub fn canonical(&self) -> CanonicalState {
        let mut ghosts: Vec<_> = self
            .ghosts
            .iter()
            .map(|g| (g.position, g.axis, g.direction))
            .collect();
        ghosts.sort_unstable();
        let mut food: Vec<_> = self.food.iter().map(|f| (f.position, f.kind)).collect();
        food.sort_unstable();
        CanonicalState {
            agent: self.agent,
            ghosts,
            food,
        }
    }

    /// Generates every legal successor, in `U, D, L, R` order.
    ///
    /// Ghosts and agent move simultaneously. A move is rejected when it leaves
    /// the grid, enters a wall, lands on a ghost's next cell, or swaps places
    /// with a ghost. An empty result means the agent is boxed in.
    pub fn successors(&self) -> Vec<Successor> {
        let ghost_moves: Vec<(Position, isize)> = self
            .ghosts
            .iter()
            .map(|ghost| ghost.next_move(&self.walls))
            .collect();

        Action::ALL
            .into_iter()
            .filter_map(|action| {
                let (d_row, d_col) = action.delta();
                let target = self
                    .agent
                    .offset(d_row, d_col)
                    .filter(|pos| self.walls.is_open(*pos))?;
                if !self.is_safe(target, &ghost_moves) {
                    return None;
                }
                Some(Successor {
                    state: self.advance(action, target, &ghost_moves),
                    action,
                    cost: 1,
                })
            })
            .collect()
    }

    fn is_safe(&self, target: Position, ghost_moves: &[(Position, isize)]) -> bool {
        self.ghosts
            .iter()
            .zip(ghost_moves)
            .all(|(ghost, (next, _))| {
                let head_on = *next == target;
                let swap = ghost.position == target && *next == self.agent;
                !head_on && !swap
            })
    }

    fn advance(&self, action: Action, target: Position, ghost_moves: &[(Position, isize)]) -> Self {
        let ghosts = self
            .ghosts
            .iter()
            .zip(ghost_moves)
            .map(|(ghost, &(position, direction))| Ghost {
                position,
                direction,
                ..*ghost
            })
            .collect();

        // Judged against the food present before anything on this cell is eaten.
        let edible_kind = self.next_food_kind();
        let food = self
            .food
            .iter()
            .filter(|f| f.position != target || Some(f.kind) != edible_kind)
            .copied()
            .collect();

        Self {
            walls: Arc::clone(&self.walls),
            agent: target,
            ghosts,
            food,
            last_action: Some(action),
        }
    }

    /// Draws the board as characters: walls, then food, ghosts and the agent on top.
    pub fn render(&self) -> Grid<char> {
        let mut picture = Grid::from_generator(self.walls.height(), self.walls.width(), |pos| {
            if self.walls.is_wall(pos) { 'W' } else { ' ' }
        });
        let marks = self
            .food
            .iter()
            .map(|f| (f.position, f.kind.letter()))
            .chain(self.ghosts.iter().map(|g| (g.position, g.axis.letter())))
            .chain(std::iter::once((self.agent, 'P')));
        for (pos, mark) in marks {
            picture[pos] = mark;
        }
        picture
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let picture = self.render();
        let border = "-".repeat(picture.width());
        writeln!(f, "+{border}+")?;
        let mut row = String::with_capacity(picture.width());
        for (pos, ch) in picture.enumerate() {
            row.push(*ch);
            if pos.col + 1 == picture.width() {
                writeln!(f, "|{row}|")?;
                row.clear();
            }
        }
        writeln!(f, "+{border}+")
    }
}
