use super::direction::Direction;
use super::grid::{Coordinate, GridSize};
use super::snake::Snake;
use crate::consts;
use rand::Rng;

/// Whether the tick loop is, or should be, running
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum RunMode {
    /// A fresh game that has not been started yet
    #[default]
    Idle,
    Running,
    Paused,
}

/// A complete snapshot of a game.
///
/// Snapshots are never edited in place: every tick, tap, and reset produces
/// a new one that replaces the previous one wholesale.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(crate) grid: GridSize,
    pub(crate) direction: Direction,
    pub(crate) snake: Snake,

    /// Always somewhere in the interior, though possibly under the snake
    pub(crate) food: Coordinate,

    /// Once set, the game no longer advances.
    pub(crate) game_over: bool,

    pub(crate) run_mode: RunMode,
}

impl GameState {
    /// Create the state of a game that hasn't started yet: a one-segment
    /// snake at [`SNAKE_START`][consts::SNAKE_START] heading right, and food
    /// at a random interior cell
    pub(crate) fn new<R: Rng>(grid: GridSize, rng: &mut R) -> GameState {
        GameState {
            grid,
            direction: consts::SNAKE_START_DIRECTION,
            snake: Snake::new(consts::SNAKE_START),
            food: grid.random_interior(rng),
            game_over: false,
            run_mode: RunMode::Idle,
        }
    }

    /// The number of food items eaten so far
    pub(crate) fn score(&self) -> usize {
        self.snake.len() - 1
    }

    pub(crate) fn with_direction(&self, direction: Direction) -> GameState {
        GameState {
            direction,
            ..self.clone()
        }
    }

    pub(crate) fn with_run_mode(&self, run_mode: RunMode) -> GameState {
        GameState {
            run_mode,
            ..self.clone()
        }
    }
}
