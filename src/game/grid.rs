use rand::Rng;
use std::ops::RangeInclusive;
use thiserror::Error;

/// A cell on the grid.  Columns grow to the right and rows grow downwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Coordinate {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Coordinate {
    pub(crate) const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }
}

/// Dimensions of the playing field, including the wall ring around its
/// edge
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    pub(crate) const DEFAULT: GridSize = GridSize {
        width: 20,
        height: 30,
    };

    /// The smallest grid whose interior still contains the snake's starting
    /// cell
    pub(crate) const MIN_SIDE: u16 = 7;

    pub(crate) fn new(width: u16, height: u16) -> Result<GridSize, GridError> {
        if width < Self::MIN_SIDE || height < Self::MIN_SIDE {
            return Err(GridError::TooSmall { width, height });
        }
        Ok(GridSize { width, height })
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    /// Columns that a snake may occupy
    pub(crate) fn interior_x(self) -> RangeInclusive<i32> {
        1..=(i32::from(self.width) - 2)
    }

    /// Rows that a snake may occupy
    pub(crate) fn interior_y(self) -> RangeInclusive<i32> {
        1..=(i32::from(self.height) - 2)
    }

    pub(crate) fn is_interior(self, c: Coordinate) -> bool {
        self.interior_x().contains(&c.x) && self.interior_y().contains(&c.y)
    }

    /// Is `c` part of the outer ring?
    pub(crate) fn is_wall(self, c: Coordinate) -> bool {
        let on_grid = (0..i32::from(self.width)).contains(&c.x)
            && (0..i32::from(self.height)).contains(&c.y);
        on_grid && !self.is_interior(c)
    }

    /// Pick an interior cell, uniformly and independently per axis.  Nothing
    /// else on the grid is taken into account.
    pub(crate) fn random_interior<R: Rng>(self, rng: &mut R) -> Coordinate {
        Coordinate {
            x: rng.random_range(self.interior_x()),
            y: rng.random_range(self.interior_y()),
        }
    }

    /// Iterate over every cell of the grid, row by row
    pub(crate) fn cells(self) -> impl Iterator<Item = Coordinate> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Coordinate { x, y }))
    }
}

impl Default for GridSize {
    fn default() -> GridSize {
        GridSize::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("grid of {width}x{height} is too small; both sides must be at least {min}", min = GridSize::MIN_SIDE)]
    TooSmall { width: u16, height: u16 },
}
