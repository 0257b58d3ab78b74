//! Simulation tick
//!
//! Core game loop step: applies control intents, gates on the game phase,
//! then advances paddles and ball and resolves collisions and scoring.

use serde::{Deserialize, Serialize};

use super::collision::{check_out_of_bounds, resolve_paddle, resolve_walls};
use super::serve::ServeSource;
use super::state::{GameEvent, GamePhase, GameState, Side, Steer};

/// Control intents for a single tick
///
/// Steering is level-based (what is held right now); `toggle_pause` and
/// `restart` are one-shot and must only be set on the tick they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub left: Steer,
    pub right: Steer,
    pub toggle_pause: bool,
    pub restart: bool,
}

impl TickInput {
    pub fn steer(&self, side: Side) -> Steer {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Bound an untrusted frame delta to `[0, max_dt]`
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    if dt > max_dt {
        log::warn!("Frame dt {dt:.3}s exceeds {max_dt:.3}s, clamping");
        return max_dt;
    }
    dt
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, serves: &mut impl ServeSource, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle (ignored once the match is decided)
    if input.toggle_pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::GameOver { .. } => {}
        }
    }

    if input.restart && matches!(state.phase, GamePhase::GameOver { .. }) {
        state.restart(serves);
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = sanitize_dt(dt, state.arena.max_dt);
    state.time_ticks += 1;
    step(state, serves, input, dt);
}

/// One simulation step. Paddles move before the ball so the paddle test
/// sees this step's paddle positions.
fn step(state: &mut GameState, serves: &mut impl ServeSource, input: &TickInput, dt: f32) {
    let speed = state.arena.paddle_speed;
    for side in [Side::Left, Side::Right] {
        let steer = input.steer(side);
        let paddle = state.paddle_mut(side);
        paddle.set_steer(steer, speed);
    }
    state.left.advance(dt, &state.arena);
    state.right.advance(dt, &state.arena);

    state.ball.advance(dt);

    if resolve_walls(&mut state.ball, &state.arena) {
        state.events.push(GameEvent::WallBounce);
        log::debug!("Wall bounce at x={:.1}", state.ball.pos.x);
    }

    for side in [Side::Left, Side::Right] {
        let paddle = match side {
            Side::Left => &state.left,
            Side::Right => &state.right,
        };
        if resolve_paddle(&mut state.ball, paddle, &state.arena) {
            state.events.push(GameEvent::PaddleHit(side));
            log::debug!("{} returned the ball at {:.1} u/s", side.label(), state.ball.speed());
        }
    }

    if let Some(scorer) = check_out_of_bounds(&state.ball, &state.arena) {
        state.paddle_mut(scorer).score += 1;
        state.events.push(GameEvent::Scored(scorer));
        log::debug!(
            "{} scores ({} - {})",
            scorer.label(),
            state.left.score,
            state.right.score
        );
        state.serve_ball(serves);
    }

    check_win(state);
}

/// Enter GameOver once either side reaches the winning score
fn check_win(state: &mut GameState) {
    if let Some(winner) = state.score().winner(state.arena.max_score) {
        state.phase = GamePhase::GameOver { winner };
        state.events.push(GameEvent::GameOver { winner });
        log::info!(
            "{} wins {} - {}",
            winner.label(),
            state.left.score,
            state.right.score
        );
    }
}
