use serde::{Deserialize, Serialize};

use crate::{Axis, Position, map::WallMask};

/// A ghost oscillating back and forth along one axis around a fixed center.
///
/// The ghost never ends a tick further than `radius` cells from `center`
/// along its axis, and never on a wall or outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ghost {
    pub center: Position,
    pub position: Position,
    pub axis: Axis,
    /// `1` or `-1`: the direction of travel along the axis.
    pub direction: isize,
    pub radius: usize,
}

impl Ghost {
    /// Creates a ghost standing on its center, heading in the positive direction.
    pub fn new(center: Position, axis: Axis, radius: usize) -> Self {
        Self {
            center,
            position: center,
            axis,
            direction: 1,
            radius,
        }
    }

    /// Distance from the center along the patrol axis.
    pub fn offset_from_center(&self, pos: Position) -> usize {
        match self.axis {
            Axis::Horizontal => pos.col.abs_diff(self.center.col),
            Axis::Vertical => pos.row.abs_diff(self.center.row),
        }
    }

    fn step(&self, direction: isize) -> Option<Position> {
        match self.axis {
            Axis::Horizontal => self.position.offset(0, direction),
            Axis::Vertical => self.position.offset(direction, 0),
        }
    }

    fn is_legal(&self, pos: Position, walls: &WallMask) -> bool {
        walls.is_open(pos) && self.offset_from_center(pos) <= self.radius
    }

    /// Computes where the ghost will be after one tick, and its heading.
    ///
    /// If the step ahead leaves the grid, hits a wall or breaches the radius,
    /// the heading flips and the ghost steps the other way on the same tick.
    /// If that step is illegal too, it stays put with the flipped heading.
    pub fn next_move(&self, walls: &WallMask) -> (Position, isize) {
        if let Some(ahead) = self.step(self.direction).filter(|p| self.is_legal(*p, walls)) {
            return (ahead, self.direction);
        }
        let reversed = -self.direction;
        match self.step(reversed).filter(|p| self.is_legal(*p, walls)) {
            Some(behind) => (behind, reversed),
            None => (self.position, reversed),
        }
    }

    /// Returns the ghost after one tick.
    pub fn advanced(&self, walls: &WallMask) -> Ghost {
        let (position, direction) = self.next_move(walls);
        Ghost {
            position,
            direction,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Grid;

    fn open_grid(height: usize, width: usize) -> WallMask {
        Grid::new(height, width)
    }

    #[test]
    fn test_full_oscillation_radius_two() {
        let walls = open_grid(1, 9);
        let mut ghost = Ghost::new(Position::new(0, 4), Axis::Horizontal, 2);
        let mut trail = Vec::new();
        for _ in 0..8 {
            ghost = ghost.advanced(&walls);
            trail.push((ghost.position.col, ghost.direction));
        }
        assert_eq!(
            trail,
            vec![
                (5, 1),
                (6, 1),
                (5, -1),
                (4, -1),
                (3, -1),
                (2, -1),
                (3, 1),
                (4, 1),
            ]
        );
        // Four ticks out and back puts it on the center, still heading back.
        assert_eq!(trail[3], (4, -1));
    }

    #[test]
    fn test_reverses_at_wall() {
        let walls = Grid::from_generator(1, 6, |pos| pos.col == 3);
        let mut ghost = Ghost::new(Position::new(0, 2), Axis::Horizontal, 3);
        ghost = ghost.advanced(&walls);
        assert_eq!((ghost.position, ghost.direction), (Position::new(0, 1), -1));
    }

    #[test]
    fn test_reverses_at_grid_edge() {
        let walls = open_grid(3, 1);
        let mut ghost = Ghost::new(Position::new(2, 0), Axis::Vertical, 2);
        ghost = ghost.advanced(&walls);
        assert_eq!((ghost.position, ghost.direction), (Position::new(1, 0), -1));
    }

    #[test]
    fn test_boxed_in_ghost_stays_put() {
        let walls = Grid::from_generator(1, 3, |pos| pos.col != 1);
        let ghost = Ghost::new(Position::new(0, 1), Axis::Horizontal, 2);
        let next = ghost.advanced(&walls);
        assert_eq!(next.position, Position::new(0, 1));
        assert_eq!(next.direction, -1);
    }

    #[test]
    fn test_radius_zero_never_moves() {
        let walls = open_grid(5, 5);
        let mut ghost = Ghost::new(Position::new(2, 2), Axis::Vertical, 0);
        for _ in 0..4 {
            ghost = ghost.advanced(&walls);
            assert_eq!(ghost.position, Position::new(2, 2));
        }
    }
}
