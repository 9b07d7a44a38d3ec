use super::grid::Coordinate;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step away from `pos` in this direction.  Bounds
    /// are not considered.
    pub(crate) fn step(self, pos: Coordinate) -> Coordinate {
        let Coordinate { x, y } = pos;
        match self {
            Direction::Up => Coordinate::new(x, y - 1),
            Direction::Down => Coordinate::new(x, y + 1),
            Direction::Left => Coordinate::new(x - 1, y),
            Direction::Right => Coordinate::new(x + 1, y),
        }
    }

    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Interpret a tap on grid cell `tap` while the snake's head is at `head`
    /// and the snake is heading in this direction.
    ///
    /// A vertically-moving snake can only be turned left or right, depending
    /// on which side of the head's column the tap landed; a
    /// horizontally-moving snake can only be turned up or down, depending on
    /// which side of the head's row the tap landed.  Ties go right and down.
    pub(crate) fn after_tap(self, head: Coordinate, tap: Coordinate) -> Direction {
        if self.is_vertical() {
            if tap.x < head.x {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if tap.y < head.y {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}
