//! Assorted constants & hard-coded configuration
use crate::game::{Coordinate, Direction};
use ratatui::style::{Color, Modifier, Style};

/// Where the snake's head starts in a new game
pub(crate) const SNAKE_START: Coordinate = Coordinate::new(5, 5);

/// Which way the snake faces in a new game
pub(crate) const SNAKE_START_DIRECTION: Direction = Direction::Right;

/// Number of terminal columns used to draw one grid cell.  Grid cells are one
/// terminal row tall.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Minimum width of the drawn screen, regardless of grid size, so that the
/// button bar fits
pub(crate) const MIN_DISPLAY_WIDTH: u16 = 34;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: &str = "^^";

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: &str = "vv";

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: &str = "<<";

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: &str = ">>";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "● ";

/// Glyph for the wall ring around the grid
pub(crate) const WALL_SYMBOL: &str = "░░";

/// Glyph for the snake's head once it has crashed
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the walls
pub(crate) const WALL_STYLE: Style = Style::new().fg(Color::Blue);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for buttons that can't currently be used
pub(crate) const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
