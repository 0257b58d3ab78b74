//! Match session
//!
//! Owns the game state together with its serve source. Create one per
//! match, call [`Session::step`] once per frame, drop it when done.

use super::serve::{SeededServe, ServeSource};
use super::state::{GameEvent, GamePhase, GameState, Score};
use super::tick::{TickInput, tick};
use crate::settings::Arena;
use crate::view::FrameView;

#[derive(Debug, Clone)]
pub struct Session<S: ServeSource = SeededServe> {
    state: GameState,
    serves: S,
}

impl Session<SeededServe> {
    /// Session with uniformly random serves from `seed`
    pub fn seeded(arena: Arena, seed: u64) -> Self {
        log::info!("Session seeded with {seed}");
        Self::new(arena, SeededServe::new(seed))
    }
}

impl<S: ServeSource> Session<S> {
    pub fn new(arena: Arena, mut serves: S) -> Self {
        log::info!(
            "New match: arena {}x{}, first to {}",
            arena.width,
            arena.height,
            arena.max_score
        );
        let state = GameState::new(arena, &mut serves);
        Self { state, serves }
    }

    /// Advance by one frame and return what happened
    pub fn step(&mut self, input: &TickInput, dt: f32) -> &[GameEvent] {
        tick(&mut self.state, &mut self.serves, input, dt);
        &self.state.events
    }

    /// Start the match over regardless of phase
    pub fn reset(&mut self) {
        self.state.events.clear();
        self.state.restart(&mut self.serves);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.state.arena
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    /// Read-only projection for the renderer
    pub fn snapshot(&self) -> FrameView {
        FrameView::capture(&self.state)
    }
}
