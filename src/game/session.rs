use super::engine::{self, Outcome};
use super::grid::{Coordinate, GridSize};
use super::speed::SpeedTable;
use super::state::{GameState, RunMode};
use rand::Rng;
use std::time::Instant;

/// A request from the user interface
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Intent {
    Start,
    Pause,
    Reset,

    /// The user tapped the board at `(x, y)`, measured in the same units as
    /// `canvas_width`, the width of the whole board
    UpdateDirection { x: f64, y: f64, canvas_width: u32 },
}

/// Owner of the published game state and of its tick loop.
///
/// The tick loop is a single deadline, `next_tick`, that the host event loop
/// waits for and then reports back through [`Session::poll_tick()`].  When
/// the deadline fires, the loop only carries on if the game is still
/// running; a pause or reset in the meantime just lets it lapse.  Since there
/// is only the one slot, the session never has two loops going at once.
#[derive(Clone, Debug)]
pub(crate) struct Session<R = rand::rngs::ThreadRng> {
    state: GameState,
    rng: R,
    speed: SpeedTable,
    next_tick: Option<Instant>,
}

impl Session<rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: GridSize, speed: SpeedTable) -> Self {
        Session::new_with_rng(grid, speed, rand::rng())
    }
}

impl<R: Rng> Session<R> {
    pub(crate) fn new_with_rng(grid: GridSize, speed: SpeedTable, mut rng: R) -> Session<R> {
        let state = GameState::new(grid, &mut rng);
        Session {
            state,
            rng,
            speed,
            next_tick: None,
        }
    }

    pub(crate) fn on_intent(&mut self, intent: Intent, now: Instant) {
        log::debug!("Received intent {intent:?}");
        match intent {
            Intent::Start => self.start(now),
            Intent::Pause => self.pause(),
            Intent::Reset => self.reset(),
            Intent::UpdateDirection { x, y, canvas_width } => {
                self.submit_direction(x, y, canvas_width);
            }
        }
    }

    /// Run the tick loop if its deadline has passed.  Returns `true` if the
    /// state was advanced.
    pub(crate) fn poll_tick(&mut self, now: Instant) -> bool {
        if self.next_tick.is_none_or(|when| when > now) {
            return false;
        }
        if self.state.run_mode != RunMode::Running {
            log::debug!(
                "Tick loop ending; run mode is {:?}",
                self.state.run_mode
            );
            self.next_tick = None;
            return false;
        }
        let (next, outcome) = engine::advance(&self.state, &mut self.rng);
        match outcome {
            Outcome::Moved | Outcome::Frozen => {
                log::trace!("Tick: {outcome:?}, head at {:?}", next.snake.head());
            }
            Outcome::Ate => log::debug!(
                "Snake ate food at {:?}; length is now {}, new food at {:?}",
                next.snake.head(),
                next.snake.len(),
                next.food
            ),
            Outcome::HitWall | Outcome::HitSelf => log::info!(
                "Game over ({outcome:?}) with score {}",
                next.score()
            ),
        }
        self.publish(next);
        self.schedule(now);
        true
    }

    /// The latest published state
    pub(crate) fn observe_state(&self) -> &GameState {
        &self.state
    }

    /// When the tick loop next wants to run, if it's active
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    fn start(&mut self, now: Instant) {
        if self.state.run_mode == RunMode::Running {
            return;
        }
        log::info!("Starting game from {:?}", self.state.run_mode);
        self.publish(self.state.with_run_mode(RunMode::Running));
        // A pause followed quickly by a start leaves the old wait in flight;
        // keep using it rather than starting a second loop.
        if self.next_tick.is_none() {
            self.schedule(now);
        }
    }

    fn pause(&mut self) {
        log::info!("Pausing game");
        self.publish(self.state.with_run_mode(RunMode::Paused));
    }

    fn reset(&mut self) {
        log::info!("Resetting game");
        let fresh = GameState::new(self.state.grid, &mut self.rng);
        self.publish(fresh);
    }

    fn submit_direction(&mut self, x: f64, y: f64, canvas_width: u32) {
        if self.state.game_over {
            return;
        }
        let cell_size = canvas_width / u32::from(self.state.grid.width());
        if cell_size == 0 {
            log::warn!(
                "Ignoring tap: canvas width {canvas_width} is narrower than the grid ({} cells)",
                self.state.grid.width()
            );
            return;
        }
        let tap = to_cell(x, y, cell_size);
        let direction = self
            .state
            .direction
            .after_tap(self.state.snake.head(), tap);
        if direction != self.state.direction {
            log::debug!("Turning {direction:?} after tap on {tap:?}");
        }
        self.publish(self.state.with_direction(direction));
    }

    fn schedule(&mut self, now: Instant) {
        self.next_tick = Some(now + self.speed.period_for(self.state.snake.len()));
    }

    fn publish(&mut self, state: GameState) {
        self.state = state;
    }
}

/// Convert a tap position to the grid cell it falls in.  Fractions are
/// truncated towards zero.
#[allow(clippy::cast_possible_truncation)]
fn to_cell(x: f64, y: f64, cell_size: u32) -> Coordinate {
    let cell_size = f64::from(cell_size);
    Coordinate::new((x / cell_size) as i32, (y / cell_size) as i32)
}
