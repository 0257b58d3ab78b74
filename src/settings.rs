//! Arena configuration
//!
//! Fixed for the lifetime of a session. Loaded from JSON with every field
//! optional; missing fields fall back to [`crate::consts`].

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Side;

/// Errors produced while loading an arena description
#[derive(Debug)]
pub enum ArenaError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::Io(e) => write!(f, "failed to read arena file: {e}"),
            ArenaError::Parse(e) => write!(f, "failed to parse arena file: {e}"),
            ArenaError::Invalid(reason) => write!(f, "invalid arena: {reason}"),
        }
    }
}

impl std::error::Error for ArenaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArenaError::Io(e) => Some(e),
            ArenaError::Parse(e) => Some(e),
            ArenaError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ArenaError {
    fn from(e: std::io::Error) -> Self {
        ArenaError::Io(e)
    }
}

impl From<serde_json::Error> for ArenaError {
    fn from(e: serde_json::Error) -> Self {
        ArenaError::Parse(e)
    }
}

/// Play field geometry and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Paddle speed (units/s)
    pub paddle_speed: f32,
    /// Distance from the side wall to the paddle center
    pub paddle_inset: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Speed at every serve (units/s)
    pub ball_speed: f32,
    /// Added to the ball speed on every paddle hit
    pub ball_speed_increment: f32,
    /// Serve cone half-angle off the horizontal (degrees)
    pub max_serve_angle_deg: f32,

    // === Rules ===
    pub max_score: u32,
    /// Largest dt a single tick integrates
    pub max_dt: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_inset: PADDLE_INSET,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED_INITIAL,
            ball_speed_increment: BALL_SPEED_INCREMENT,
            max_serve_angle_deg: MAX_SERVE_ANGLE_DEG,

            max_score: MAX_SCORE,
            max_dt: MAX_DT,
        }
    }
}

impl Arena {
    /// Parse and validate an arena from JSON
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let arena: Arena = serde_json::from_str(json)?;
        arena.validate()?;
        Ok(arena)
    }

    /// Read, parse and validate an arena file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let arena = Self::from_json(&json)?;
        log::info!("Loaded arena {}x{} from {}", arena.width, arena.height, path.display());
        Ok(arena)
    }

    /// Reject geometry the simulation cannot run on
    pub fn validate(&self) -> Result<(), ArenaError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("max_dt", self.max_dt),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ArenaError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.ball_speed_increment.is_finite() || self.ball_speed_increment < 0.0 {
            return Err(ArenaError::Invalid(format!(
                "ball_speed_increment must be non-negative, got {}",
                self.ball_speed_increment
            )));
        }
        if self.paddle_height > self.height {
            return Err(ArenaError::Invalid(format!(
                "paddle_height {} exceeds arena height {}",
                self.paddle_height, self.height
            )));
        }
        let half_w = self.paddle_width / 2.0;
        if !self.paddle_inset.is_finite()
            || self.paddle_inset < half_w
            || self.paddle_inset + half_w > self.width / 2.0
        {
            return Err(ArenaError::Invalid(format!(
                "paddle_inset {} places paddles outside their half of the arena",
                self.paddle_inset
            )));
        }
        if self.ball_radius * 2.0 >= self.height.min(self.width) {
            return Err(ArenaError::Invalid(format!(
                "ball_radius {} does not fit the arena",
                self.ball_radius
            )));
        }
        if !(self.max_serve_angle_deg > 0.0 && self.max_serve_angle_deg < 90.0) {
            return Err(ArenaError::Invalid(format!(
                "max_serve_angle_deg must be within (0, 90), got {}",
                self.max_serve_angle_deg
            )));
        }
        if self.max_score == 0 {
            return Err(ArenaError::Invalid("max_score must be at least 1".into()));
        }
        Ok(())
    }

    /// Arena center (serve point)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Fixed X position of a side's paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_inset,
            Side::Right => self.width - self.paddle_inset,
        }
    }

    /// Keep a paddle center inside the arena
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let half_height = self.paddle_height / 2.0;
        y.clamp(half_height, self.height - half_height)
    }

    /// Serve cone half-angle in radians
    pub fn max_serve_angle(&self) -> f32 {
        self.max_serve_angle_deg.to_radians()
    }
}
