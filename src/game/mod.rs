mod direction;
mod engine;
mod grid;
mod session;
mod snake;
mod speed;
mod state;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Coordinate, GridError, GridSize};
pub(crate) use self::session::{Intent, Session};
pub(crate) use self::speed::{deserialize_millis, SpeedError, SpeedTable, SpeedTier};
pub(crate) use self::state::{GameState, RunMode};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::util::center_rect;
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use enum_map::{Enum, EnumMap};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::time::Instant;

/// The game screen: draws the published state and turns terminal input into
/// intents for the session
#[derive(Clone, Debug)]
pub(crate) struct GameScreen<R = rand::rngs::ThreadRng> {
    session: Session<R>,

    /// The terminal area most recently drawn to, used for hit-testing mouse
    /// clicks
    area: Rect,
}

impl GameScreen<rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: GridSize, speed: SpeedTable) -> Self {
        GameScreen {
            session: Session::new(grid, speed),
            area: Rect::ZERO,
        }
    }
}

impl<R: Rng> GameScreen<R> {
    #[cfg(test)]
    fn new_with_rng(grid: GridSize, speed: SpeedTable, rng: R) -> GameScreen<R> {
        GameScreen {
            session: Session::new_with_rng(grid, speed, rng),
            area: Rect::ZERO,
        }
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame<'_>) {
        self.area = frame.area();
        frame.render_widget(GameView(self.session.observe_state()), frame.area());
    }

    /// Wait for either an input event or the session's next tick, whichever
    /// comes first, and handle it
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if let Some(when) = self.session.next_deadline() {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.session.poll_tick(Instant::now());
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match event {
            Event::FocusLost => {
                if self.state().run_mode == RunMode::Running {
                    self.dispatch(Intent::Pause);
                }
            }
            Event::Resize(width, height) => self.area = Rect::new(0, 0, width, height),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.click(Position::new(column, row)),
            _ => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::Quit | Command::Q => return Some(Screen::Quit),
                Command::Space => self.press(Button::Toggle),
                Command::R => self.press(Button::Reset),
                Command::Up => self.steer(Direction::Up),
                Command::Down => self.steer(Direction::Down),
                Command::Left => self.steer(Direction::Left),
                Command::Right => self.steer(Direction::Right),
            },
        }
        None
    }

    fn state(&self) -> &GameState {
        self.session.observe_state()
    }

    fn dispatch(&mut self, intent: Intent) {
        self.session.on_intent(intent, Instant::now());
    }

    fn press(&mut self, button: Button) {
        if let Some(intent) = button.intent(self.state()) {
            self.dispatch(intent);
        }
    }

    fn click(&mut self, pos: Position) {
        let layout = ScreenLayout::new(self.area, self.state().grid);
        if layout.board.contains(pos) {
            // Aim at the middle of the cell, and scale rows up so that cells
            // come out square in tap units.
            let x = f64::from(pos.x - layout.board.x) + 0.5;
            let y = (f64::from(pos.y - layout.board.y) + 0.5) * f64::from(consts::CELL_WIDTH);
            self.tap(x, y);
        } else if let Some((button, _)) = layout.buttons.iter().find(|(_, r)| r.contains(pos)) {
            self.press(button);
        }
    }

    /// Turn as though the user had tapped the cell next to the head in
    /// `direction`.  Keys along the current axis of travel would only ever
    /// turn the snake sideways, so they are ignored.
    fn steer(&mut self, direction: Direction) {
        let state = self.state();
        if direction.is_vertical() == state.direction.is_vertical() {
            return;
        }
        let target = direction.step(state.snake.head());
        let scale = f64::from(consts::CELL_WIDTH);
        let x = (f64::from(target.x) + 0.5) * scale;
        let y = (f64::from(target.y) + 0.5) * scale;
        self.tap(x, y);
    }

    /// Taps only count while the game is running.
    fn tap(&mut self, x: f64, y: f64) {
        if self.state().run_mode == RunMode::Running {
            let canvas_width = u32::from(self.state().grid.width()) * u32::from(consts::CELL_WIDTH);
            self.dispatch(Intent::UpdateDirection { x, y, canvas_width });
        }
    }
}

/// The clickable buttons below the board
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum Button {
    /// Start a new game
    Reset,

    /// Start, pause, or resume
    Toggle,
}

impl Button {
    /// What pressing the button would do in `state`, or `None` if the button
    /// is disabled
    fn intent(self, state: &GameState) -> Option<Intent> {
        match self {
            Button::Reset => {
                (state.game_over || state.run_mode == RunMode::Paused).then_some(Intent::Reset)
            }
            Button::Toggle if state.game_over => None,
            Button::Toggle => match state.run_mode {
                RunMode::Idle | RunMode::Paused => Some(Intent::Start),
                RunMode::Running => Some(Intent::Pause),
            },
        }
    }

    fn to_line(self, state: &GameState) -> Line<'static> {
        let style = if self.intent(state).is_some() {
            Style::new()
        } else {
            consts::DISABLED_STYLE
        };
        let (label, key) = match self {
            Button::Reset if state.game_over => ("Restart", "r"),
            Button::Reset => ("New Game", "r"),
            Button::Toggle => match state.run_mode {
                RunMode::Idle => ("Start", "space"),
                RunMode::Running => ("Pause", "space"),
                RunMode::Paused => ("Resume", "space"),
            },
        };
        Line::from_iter([
            Span::styled(format!("[{label} ("), style),
            Span::styled(key, consts::KEY_STYLE.patch(style)),
            Span::styled(")]", style),
        ])
    }
}

/// Where everything goes on the screen
#[derive(Clone, Debug, Eq, PartialEq)]
struct ScreenLayout {
    score: Rect,
    board: Rect,
    message: Rect,
    buttons: EnumMap<Button, Rect>,
}

impl ScreenLayout {
    fn new(area: Rect, grid: GridSize) -> ScreenLayout {
        let board_size = Size {
            width: grid.width().saturating_mul(consts::CELL_WIDTH),
            height: grid.height(),
        };
        let display = center_rect(
            area,
            Size {
                width: board_size.width.max(consts::MIN_DISPLAY_WIDTH),
                height: board_size.height.saturating_add(3),
            },
        );
        let [score, board_row, message, button_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(board_size.height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let board = center_rect(board_row, board_size);
        let [reset, toggle] = Layout::horizontal([Constraint::Fill(1); 2]).areas(button_row);
        ScreenLayout {
            score,
            board,
            message,
            buttons: EnumMap::from_array([reset, toggle]),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct GameView<'a>(&'a GameState);

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.0;
        let layout = ScreenLayout::new(area, state.grid);
        Line::styled(format!(" Score: {}", state.score()), consts::SCORE_BAR_STYLE)
            .render(layout.score, buf);

        let mut board = Canvas {
            area: layout.board,
            buf,
        };
        for c in state.grid.cells().filter(|&c| state.grid.is_wall(c)) {
            board.draw_cell(c, consts::WALL_SYMBOL, consts::WALL_STYLE);
        }
        board.draw_cell(state.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        for c in state.snake.iter().skip(1) {
            board.draw_cell(c, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        let head = state.snake.head();
        if state.game_over {
            board.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            board.draw_cell(head, head_symbol(state.direction), consts::SNAKE_STYLE);
        }

        if state.game_over {
            Span::from(" GAME OVER ").render(layout.message, buf);
        }
        for (button, &rect) in &layout.buttons {
            button.to_line(state).centered().render(rect, buf);
        }
    }
}

fn head_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Coordinate, symbol: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x) = x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        for (ch, x) in symbol.chars().zip(x..) {
            if !self.area.contains(Position { x, y }) {
                break;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn small_grid() -> GridSize {
        GridSize::new(8, 7).unwrap()
    }

    fn sample_state(run_mode: RunMode) -> GameState {
        GameState {
            grid: small_grid(),
            direction: Direction::Right,
            snake: snake::Snake::from_segments([Coordinate::new(3, 3), Coordinate::new(2, 3)])
                .unwrap(),
            food: Coordinate::new(5, 2),
            game_over: false,
            run_mode,
        }
    }

    fn render(state: &GameState) -> Buffer {
        let area = Rect::new(0, 0, 34, 10);
        let mut buffer = Buffer::empty(area);
        GameView(state).render(area, &mut buffer);
        buffer
    }

    fn style_walls(expected: &mut Buffer) {
        expected.set_style(Rect::new(9, 1, 16, 1), consts::WALL_STYLE);
        expected.set_style(Rect::new(9, 7, 16, 1), consts::WALL_STYLE);
        expected.set_style(Rect::new(9, 2, 2, 5), consts::WALL_STYLE);
        expected.set_style(Rect::new(23, 2, 2, 5), consts::WALL_STYLE);
    }

    fn screen() -> GameScreen<ChaCha12Rng> {
        let mut screen = GameScreen::new_with_rng(
            small_grid(),
            SpeedTable::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        screen.area = Rect::new(0, 0, 34, 10);
        screen
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn idle_game() {
        let buffer = render(&sample_state(RunMode::Idle));
        let mut expected = Buffer::with_lines([
            " Score: 1",
            "         ░░░░░░░░░░░░░░░░         ",
            "         ░░            ░░         ",
            "         ░░        ●   ░░         ",
            "         ░░  ██>>      ░░         ",
            "         ░░            ░░         ",
            "         ░░            ░░         ",
            "         ░░░░░░░░░░░░░░░░         ",
            "",
            " [New Game (r)]   [Start (space)] ",
        ]);
        expected.set_style(Rect::new(0, 0, 34, 1), consts::SCORE_BAR_STYLE);
        style_walls(&mut expected);
        expected.set_style(Rect::new(19, 3, 2, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(13, 4, 4, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(1, 9, 14, 1), consts::DISABLED_STYLE);
        expected.set_style(Rect::new(26, 9, 5, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn paused_game() {
        let buffer = render(&sample_state(RunMode::Paused));
        let mut expected = Buffer::with_lines([
            " Score: 1",
            "         ░░░░░░░░░░░░░░░░         ",
            "         ░░            ░░         ",
            "         ░░        ●   ░░         ",
            "         ░░  ██>>      ░░         ",
            "         ░░            ░░         ",
            "         ░░            ░░         ",
            "         ░░░░░░░░░░░░░░░░         ",
            "",
            " [New Game (r)]  [Resume (space)] ",
        ]);
        expected.set_style(Rect::new(0, 0, 34, 1), consts::SCORE_BAR_STYLE);
        style_walls(&mut expected);
        expected.set_style(Rect::new(19, 3, 2, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(13, 4, 4, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(12, 9, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(26, 9, 5, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn game_over() {
        let state = GameState {
            direction: Direction::Left,
            snake: snake::Snake::from_segments([
                Coordinate::new(1, 3),
                Coordinate::new(2, 3),
                Coordinate::new(3, 3),
            ])
            .unwrap(),
            game_over: true,
            ..sample_state(RunMode::Running)
        };
        let buffer = render(&state);
        let mut expected = Buffer::with_lines([
            " Score: 2",
            "         ░░░░░░░░░░░░░░░░         ",
            "         ░░            ░░         ",
            "         ░░        ●   ░░         ",
            "         ░░××████      ░░         ",
            "         ░░            ░░         ",
            "         ░░            ░░         ",
            "         ░░░░░░░░░░░░░░░░         ",
            " GAME OVER ",
            "  [Restart (r)]   [Pause (space)] ",
        ]);
        expected.set_style(Rect::new(0, 0, 34, 1), consts::SCORE_BAR_STYLE);
        style_walls(&mut expected);
        expected.set_style(Rect::new(19, 3, 2, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(11, 4, 2, 1), consts::COLLISION_STYLE);
        expected.set_style(Rect::new(13, 4, 4, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(12, 9, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(18, 9, 15, 1), consts::DISABLED_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn snake_covers_food() {
        let state = GameState {
            food: Coordinate::new(2, 3),
            ..sample_state(RunMode::Running)
        };
        let buffer = render(&state);
        assert_eq!(buffer[(13, 4)].symbol(), "█");
        assert_eq!(buffer[(14, 4)].symbol(), "█");
    }

    #[test]
    fn buttons_follow_state() {
        let idle = sample_state(RunMode::Idle);
        assert_eq!(Button::Reset.intent(&idle), None);
        assert_eq!(Button::Toggle.intent(&idle), Some(Intent::Start));
        let running = sample_state(RunMode::Running);
        assert_eq!(Button::Reset.intent(&running), None);
        assert_eq!(Button::Toggle.intent(&running), Some(Intent::Pause));
        let paused = sample_state(RunMode::Paused);
        assert_eq!(Button::Reset.intent(&paused), Some(Intent::Reset));
        assert_eq!(Button::Toggle.intent(&paused), Some(Intent::Start));
        let over = GameState {
            game_over: true,
            ..running
        };
        assert_eq!(Button::Reset.intent(&over), Some(Intent::Reset));
        assert_eq!(Button::Toggle.intent(&over), None);
    }

    #[test]
    fn layout_of_small_grid() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), small_grid());
        assert_eq!(layout.score, Rect::new(23, 7, 34, 1));
        assert_eq!(layout.board, Rect::new(32, 8, 16, 7));
        assert_eq!(layout.message, Rect::new(23, 15, 34, 1));
        assert_eq!(layout.buttons[Button::Reset], Rect::new(23, 16, 17, 1));
        assert_eq!(layout.buttons[Button::Toggle], Rect::new(40, 16, 17, 1));
    }

    #[test]
    fn space_toggles_run_mode() {
        let mut screen = screen();
        let space = Event::Key(KeyCode::Char(' ').into());
        assert!(screen.handle_event(space.clone()).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Running);
        assert!(screen.session.next_deadline().is_some());
        assert!(screen.handle_event(space).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Paused);
    }

    #[test]
    fn reset_key_only_when_paused() {
        let mut screen = screen();
        let reset = Event::Key(KeyCode::Char('r').into());
        assert!(screen.handle_event(Event::Key(KeyCode::Char(' ').into())).is_none());
        assert!(screen.handle_event(reset.clone()).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Running);
        assert!(screen.handle_event(Event::FocusLost).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Paused);
        assert!(screen.handle_event(reset).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Idle);
    }

    #[test]
    fn click_buttons() {
        let mut screen = screen();
        assert!(screen.handle_event(click(25, 9)).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Running);
        assert!(screen.handle_event(click(25, 9)).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Paused);
        assert!(screen.handle_event(click(5, 9)).is_none());
        assert_eq!(screen.state().run_mode, RunMode::Idle);
    }

    #[test]
    fn click_board_turns_snake() {
        let mut screen = screen();
        // Not running yet
        assert!(screen.handle_event(click(10, 2)).is_none());
        assert_eq!(screen.state().direction, Direction::Right);
        assert!(screen.handle_event(click(25, 9)).is_none());
        // The head is at (5, 5), drawn at columns 19-20 of row 6.  Row 2 is
        // above it.
        assert!(screen.handle_event(click(10, 2)).is_none());
        assert_eq!(screen.state().direction, Direction::Up);
        // Column 21 is the cell to the right of the head.
        assert!(screen.handle_event(click(21, 2)).is_none());
        assert_eq!(screen.state().direction, Direction::Right);
        // Same row as the head
        assert!(screen.handle_event(click(10, 6)).is_none());
        assert_eq!(screen.state().direction, Direction::Down);
    }

    #[test]
    fn arrow_keys_steer() {
        let mut screen = screen();
        assert!(screen.handle_event(Event::Key(KeyCode::Char(' ').into())).is_none());
        assert!(screen.handle_event(Event::Key(KeyCode::Left.into())).is_none());
        assert_eq!(screen.state().direction, Direction::Right);
        assert!(screen.handle_event(Event::Key(KeyCode::Up.into())).is_none());
        assert_eq!(screen.state().direction, Direction::Up);
        assert!(screen.handle_event(Event::Key(KeyCode::Left.into())).is_none());
        assert_eq!(screen.state().direction, Direction::Left);
        assert!(screen.handle_event(Event::Key(KeyCode::Down.into())).is_none());
        assert_eq!(screen.state().direction, Direction::Down);
    }

    #[test]
    fn quit() {
        let mut screen = screen();
        assert!(matches!(
            screen.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(Screen::Quit)
        ));
    }
}
