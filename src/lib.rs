//! Twin Pong - a two-player paddle-and-ball arena
//!
//! Core modules:
//! - `sim`: Simulation core (motion, collisions, scoring, game phases)
//! - `settings`: Arena configuration fixed at construction
//! - `view`: Read-only per-frame projection for renderers
//! - `input`: Key state to control intent mapping

pub mod input;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{Arena, ArenaError};
pub use sim::{GamePhase, GameState, Session, Side, TickInput, tick};
pub use view::FrameView;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the frame driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the driver feeds into its accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Distance from each side wall to the paddle center
    pub const PADDLE_INSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_SPEED_INITIAL: f32 = 400.0;
    /// Added to the ball speed on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 25.0;
    /// Serve cone half-angle off the horizontal (degrees)
    pub const MAX_SERVE_ANGLE_DEG: f32 = 60.0;

    /// First side to reach this wins
    pub const MAX_SCORE: u32 = 10;

    /// Largest dt a single tick will integrate
    pub const MAX_DT: f32 = 0.1;
}
