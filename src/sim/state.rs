//! Game state and core simulation types
//!
//! Plain data owned by the simulation. Renderers read it through
//! [`crate::view::FrameView`] and never mutate it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::serve::{Serve, ServeSource};
use crate::settings::Arena;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Human-facing player name
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// Vertical steering for a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steer {
    Up,
    Down,
    #[default]
    Stop,
}

impl Steer {
    /// Resolve held up/down controls; opposing holds cancel out
    pub fn from_held(up: bool, down: bool) -> Self {
        match (up, down) {
            (true, false) => Steer::Up,
            (false, true) => Steer::Down,
            _ => Steer::Stop,
        }
    }

    /// Direction sign in screen space (y grows downward)
    pub fn sign(self) -> f32 {
        match self {
            Steer::Up => -1.0,
            Steer::Down => 1.0,
            Steer::Stop => 0.0,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen until the next pause toggle
    Paused,
    /// Match decided, waiting for restart
    GameOver { winner: Side },
}

impl GamePhase {
    pub fn winner(self) -> Option<Side> {
        match self {
            GamePhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    PaddleHit(Side),
    Scored(Side),
    Paused,
    Resumed,
    GameOver { winner: Side },
    Restarted,
}

/// A player's paddle (center-anchored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    /// Only the y component is ever nonzero
    pub vel: Vec2,
    pub size: Vec2,
    pub score: u32,
}

impl Paddle {
    pub fn new(side: Side, arena: &Arena) -> Self {
        Self {
            side,
            pos: Vec2::new(arena.paddle_x(side), arena.height / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::new(arena.paddle_width, arena.paddle_height),
            score: 0,
        }
    }

    /// Set vertical velocity from a steering intent
    pub fn set_steer(&mut self, steer: Steer, speed: f32) {
        self.vel = Vec2::new(0.0, steer.sign() * speed);
    }

    /// Integrate and clamp into the arena. Velocity is kept when clamped
    /// so a held key keeps the paddle pinned against the wall.
    pub fn advance(&mut self, dt: f32, arena: &Arena) {
        self.pos.y = arena.clamp_paddle_y(self.pos.y + self.vel.y * dt);
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// Back to the serve position with zero velocity and score
    pub fn reset(&mut self, arena: &Arena) {
        *self = Self::new(self.side, arena);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A ball already served from the arena center
    pub fn new(arena: &Arena, serve: Serve) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: arena.ball_radius,
        };
        ball.serve(arena, serve);
        ball
    }

    /// Recenter and launch at the initial speed
    pub fn serve(&mut self, arena: &Arena, serve: Serve) {
        let max_angle = arena.max_serve_angle();
        let angle = serve.angle.clamp(-max_angle, max_angle);
        let mut vel = Vec2::from_angle(angle) * arena.ball_speed;
        if serve.toward == Side::Left {
            vel.x = -vel.x;
        }
        self.pos = arena.center();
        self.vel = vel;
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Add `delta` to the speed keeping the direction. A stalled ball has no
    /// direction, so it is relaunched along +x at `relaunch_speed` instead.
    pub fn increase_speed(&mut self, delta: f32, relaunch_speed: f32) {
        match self.vel.try_normalize() {
            Some(dir) => self.vel = dir * (self.vel.length() + delta),
            None => {
                log::warn!("Ball had no velocity to speed up, relaunching");
                self.vel = Vec2::X * relaunch_speed;
            }
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// Both scores as a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    /// Side that has reached `max_score`, if any
    pub fn winner(&self, max_score: u32) -> Option<Side> {
        if self.left >= max_score {
            Some(Side::Left)
        } else if self.right >= max_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub phase: GamePhase,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Ticks that advanced the simulation
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh match with the first serve taken from `serves`
    pub fn new(arena: Arena, serves: &mut impl ServeSource) -> Self {
        let serve = serves.next_serve(arena.max_serve_angle());
        Self {
            left: Paddle::new(Side::Left, &arena),
            right: Paddle::new(Side::Right, &arena),
            ball: Ball::new(&arena, serve),
            phase: GamePhase::Playing,
            events: Vec::new(),
            time_ticks: 0,
            arena,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn score(&self) -> Score {
        Score {
            left: self.left.score,
            right: self.right.score,
        }
    }

    /// Serve a new rally from the center
    pub fn serve_ball(&mut self, serves: &mut impl ServeSource) {
        let serve = serves.next_serve(self.arena.max_serve_angle());
        self.ball.serve(&self.arena, serve);
    }

    /// Zero scores, recenter everything and resume play
    pub fn restart(&mut self, serves: &mut impl ServeSource) {
        self.left.reset(&self.arena);
        self.right.reset(&self.arena);
        self.serve_ball(serves);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Match restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::serve::{ScriptedServe, SeededServe};
    use proptest::prelude::*;

    #[test]
    fn test_new_state_is_centered() {
        let mut serves = ScriptedServe::flat(Side::Right);
        let state = GameState::new(Arena::default(), &mut serves);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.left.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.right.pos, Vec2::new(750.0, 300.0));
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(400.0, 0.0));
        assert_eq!(state.score(), Score::default());
    }

    #[test]
    fn test_steer_sets_velocity() {
        let arena = Arena::default();
        let mut paddle = Paddle::new(Side::Left, &arena);
        paddle.set_steer(Steer::Up, arena.paddle_speed);
        assert_eq!(paddle.vel, Vec2::new(0.0, -500.0));
        paddle.set_steer(Steer::Down, arena.paddle_speed);
        assert_eq!(paddle.vel, Vec2::new(0.0, 500.0));
        paddle.set_steer(Steer::Stop, arena.paddle_speed);
        assert_eq!(paddle.vel, Vec2::ZERO);
    }

    #[test]
    fn test_steer_from_held() {
        assert_eq!(Steer::from_held(true, false), Steer::Up);
        assert_eq!(Steer::from_held(false, true), Steer::Down);
        assert_eq!(Steer::from_held(true, true), Steer::Stop);
        assert_eq!(Steer::from_held(false, false), Steer::Stop);
    }

    #[test]
    fn test_paddle_clamp_keeps_velocity() {
        let arena = Arena::default();
        let mut paddle = Paddle::new(Side::Right, &arena);
        paddle.set_steer(Steer::Up, arena.paddle_speed);
        paddle.advance(10.0, &arena);
        assert_eq!(paddle.pos.y, 50.0);
        assert_eq!(paddle.vel.y, -500.0);
    }

    #[test]
    fn test_paddle_bounds() {
        let arena = Arena::default();
        let paddle = Paddle::new(Side::Left, &arena);
        let rect = paddle.bounds();
        assert_eq!(rect.min, Vec2::new(40.0, 250.0));
        assert_eq!(rect.size(), Vec2::new(20.0, 100.0));
    }

    #[test]
    fn test_ball_bounds() {
        let arena = Arena::default();
        let ball = Ball::new(&arena, Serve::new(0.0, Side::Left));
        let rect = ball.bounds();
        assert_eq!(rect.min, Vec2::new(385.0, 285.0));
        assert_eq!(rect.size(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_serve_toward_left() {
        let arena = Arena::default();
        let ball = Ball::new(&arena, Serve::new(0.0, Side::Left));
        assert_eq!(ball.vel, Vec2::new(-400.0, 0.0));
    }

    #[test]
    fn test_serve_clamps_wild_angle() {
        let arena = Arena::default();
        let ball = Ball::new(&arena, Serve::new(3.0, Side::Right));
        assert!((ball.vel.x - 200.0).abs() < 1e-3);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_increase_speed_relaunches_stalled_ball() {
        let arena = Arena::default();
        let mut ball = Ball::new(&arena, Serve::new(0.0, Side::Left));
        ball.vel = Vec2::ZERO;
        ball.increase_speed(arena.ball_speed_increment, arena.ball_speed);
        assert_eq!(ball.vel, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn test_score_winner() {
        let score = Score { left: 9, right: 3 };
        assert_eq!(score.winner(10), None);
        let score = Score { left: 10, right: 3 };
        assert_eq!(score.winner(10), Some(Side::Left));
        let score = Score { left: 2, right: 11 };
        assert_eq!(score.winner(10), Some(Side::Right));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut serves = SeededServe::new(5);
        let mut state = GameState::new(Arena::default(), &mut serves);
        state.left.score = 4;
        state.right.score = 10;
        state.left.pos.y = 80.0;
        state.right.vel.y = 500.0;
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.phase = GamePhase::GameOver { winner: Side::Right };

        state.restart(&mut serves);

        assert_eq!(state.score(), Score::default());
        assert_eq!(state.left.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.right.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos, state.arena.center());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Restarted]);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_arena(
            start in 50.0f32..550.0,
            vy in -5000.0f32..5000.0,
            dt in 0.0f32..5.0,
        ) {
            let arena = Arena::default();
            let mut paddle = Paddle::new(Side::Left, &arena);
            paddle.pos.y = start;
            paddle.vel.y = vy;
            paddle.advance(dt, &arena);
            prop_assert!(paddle.pos.y >= arena.paddle_height / 2.0);
            prop_assert!(paddle.pos.y <= arena.height - arena.paddle_height / 2.0);
        }

        #[test]
        fn prop_serve_within_cone(seed in any::<u64>()) {
            let arena = Arena::default();
            let mut serves = SeededServe::new(seed);
            let mut ball = Ball::new(&arena, serves.next_serve(arena.max_serve_angle()));
            for _ in 0..8 {
                let angle = ball.vel.y.atan2(ball.vel.x.abs());
                prop_assert!(angle.abs() <= arena.max_serve_angle() + 1e-4);
                prop_assert!(ball.vel.x.abs() >= 0.5 * arena.ball_speed - 1e-2);
                prop_assert!((ball.speed() - arena.ball_speed).abs() < 1e-2);
                ball.serve(&arena, serves.next_serve(arena.max_serve_angle()));
            }
        }

        #[test]
        fn prop_increase_speed_adds_exactly(
            angle in -3.1f32..3.1,
            speed in 10.0f32..2000.0,
            delta in 0.1f32..100.0,
        ) {
            let arena = Arena::default();
            let mut ball = Ball::new(&arena, Serve::new(0.0, Side::Right));
            ball.vel = Vec2::from_angle(angle) * speed;
            let dir_before = ball.vel.normalize();
            ball.increase_speed(delta, arena.ball_speed);
            prop_assert!((ball.speed() - (speed + delta)).abs() < speed * 1e-5 + 1e-3);
            prop_assert!((ball.vel.normalize() - dir_before).length() < 1e-4);
        }
    }
}
