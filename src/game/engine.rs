//! Advancing a game by one tick
use super::state::GameState;
use rand::Rng;

/// What happened during a tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The game was already over, so nothing changed.
    Frozen,

    /// The snake moved without eating.
    Moved,

    /// The snake ate the food, grew by one segment, and new food was placed.
    Ate,

    /// The snake tried to move into the wall ring.
    HitWall,

    /// The snake tried to move onto one of its own segments.
    HitSelf,
}

/// Compute the state that follows `state` after one tick, and report what
/// happened.
///
/// Self-collision is checked against the body as it was before the move, so
/// moving into the cell the tail is about to vacate still ends the game.
/// Fresh food is drawn from the whole interior, including cells under the
/// snake.
pub(crate) fn advance<R: Rng>(state: &GameState, rng: &mut R) -> (GameState, Outcome) {
    if state.game_over {
        return (state.clone(), Outcome::Frozen);
    }
    let new_head = state.direction.step(state.snake.head());
    let collision = if state.snake.contains(new_head) {
        Some(Outcome::HitSelf)
    } else if !state.grid.is_interior(new_head) {
        Some(Outcome::HitWall)
    } else {
        None
    };
    if let Some(outcome) = collision {
        let over = GameState {
            game_over: true,
            ..state.clone()
        };
        return (over, outcome);
    }
    let ate = new_head == state.food;
    let food = if ate {
        state.grid.random_interior(rng)
    } else {
        state.food
    };
    let next = GameState {
        snake: state.snake.moved_to(new_head, ate),
        food,
        ..state.clone()
    };
    (next, if ate { Outcome::Ate } else { Outcome::Moved })
}
