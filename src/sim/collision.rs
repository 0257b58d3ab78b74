//! Collision detection and response
//!
//! Ball against the top/bottom walls, against paddles, and against the
//! open left/right edges where points are scored. Each check mutates the
//! ball in place and reports whether it fired.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::settings::Arena;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Overlap test; boxes that only touch do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Bounce off the top and bottom walls. Both edges are checked
/// independently; only the vertical velocity is reflected.
pub fn resolve_walls(ball: &mut Ball, arena: &Arena) -> bool {
    let mut bounced = false;
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }
    if ball.pos.y + ball.radius > arena.height {
        ball.pos.y = arena.height - ball.radius;
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }
    bounced
}

/// Where along the paddle the ball struck, -1 (top edge) to 1 (bottom edge)
pub fn hit_position(ball: &Ball, paddle: &Paddle) -> f32 {
    ((ball.pos.y - paddle.pos.y) / (paddle.size.y / 2.0)).clamp(-1.0, 1.0)
}

/// Return the ball off a paddle
///
/// On overlap the ball is pushed out on the side it came from, its
/// horizontal velocity is reversed, and the vertical velocity is rebuilt
/// from the hit position so edge hits leave at a steep angle. The ball then
/// speeds up by the arena increment.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, arena: &Arena) -> bool {
    if !ball.bounds().intersects(&paddle.bounds()) {
        return false;
    }

    let half_width = paddle.size.x / 2.0;
    ball.pos.x = if ball.vel.x > 0.0 {
        paddle.pos.x - half_width - ball.radius
    } else {
        paddle.pos.x + half_width + ball.radius
    };

    ball.vel.x = -ball.vel.x;
    ball.vel.y = hit_position(ball, paddle) * arena.ball_speed;
    ball.increase_speed(arena.ball_speed_increment, arena.ball_speed);
    true
}

/// Side that scores if the ball has left through the left or right edge
pub fn check_out_of_bounds(ball: &Ball, arena: &Arena) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > arena.width {
        Some(Side::Left)
    } else {
        None
    }
}
