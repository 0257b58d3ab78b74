//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Caller-supplied dt only, bounded per tick
//! - Injected serve source only
//! - Fixed update order (paddles, ball, walls, paddle hits, scoring, win)
//! - No rendering or platform dependencies

pub mod collision;
pub mod serve;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_out_of_bounds, hit_position, resolve_paddle, resolve_walls};
pub use serve::{ScriptedServe, SeededServe, Serve, ServeSource};
pub use session::Session;
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Score, Side, Steer};
pub use tick::{TickInput, sanitize_dt, tick};
