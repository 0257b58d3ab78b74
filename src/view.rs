//! Per-frame view for renderers
//!
//! A copy of exactly what a frontend needs to draw one frame. Taking the
//! view never borrows the simulation past the call, so it can be handed to
//! a render thread while the next step runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState, Paddle, Side};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub center: Vec2,
    pub size: Vec2,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            center: paddle.pos,
            size: paddle.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub arena_size: Vec2,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: BallView,
    pub score: (u32, u32),
    pub phase: GamePhase,
    pub winner: Option<Side>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            arena_size: Vec2::new(state.arena.width, state.arena.height),
            left: PaddleView::from(&state.left),
            right: PaddleView::from(&state.right),
            ball: BallView {
                center: state.ball.pos,
                radius: state.ball.radius,
            },
            score: (state.left.score, state.right.score),
            phase: state.phase,
            winner: state.phase.winner(),
        }
    }

    /// Scoreline as shown above the center line
    pub fn score_text(&self) -> String {
        format!("{} - {}", self.score.0, self.score.1)
    }

    /// Overlay headline, if the phase has one
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some("Game Paused".to_string()),
            GamePhase::GameOver { winner } => Some(format!("{} Wins!", winner.label())),
        }
    }

    /// Key hint shown under the banner
    pub fn prompt(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some("Press P to continue"),
            GamePhase::GameOver { .. } => Some("Press R to restart or ESC to exit"),
        }
    }
}
