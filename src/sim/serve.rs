//! Serve direction sources
//!
//! Every rally starts from the arena center in a direction picked here.
//! Sessions take the source as a parameter so tests can script serves.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Side;

/// Direction of a single serve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Serve {
    /// Angle off the horizontal (radians, positive = downward)
    pub angle: f32,
    /// Which side's paddle the ball travels toward
    pub toward: Side,
}

impl Serve {
    pub fn new(angle: f32, toward: Side) -> Self {
        Self { angle, toward }
    }
}

/// Provides serve directions
pub trait ServeSource {
    /// Next serve, with `angle` inside `[-max_angle, max_angle]`
    fn next_serve(&mut self, max_angle: f32) -> Serve;
}

impl<S: ServeSource + ?Sized> ServeSource for &mut S {
    fn next_serve(&mut self, max_angle: f32) -> Serve {
        (**self).next_serve(max_angle)
    }
}

/// Uniform serves from a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededServe {
    rng: Pcg32,
}

impl SeededServe {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl ServeSource for SeededServe {
    fn next_serve(&mut self, max_angle: f32) -> Serve {
        let angle = self.rng.random_range(-max_angle..=max_angle);
        let toward = if self.rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        Serve { angle, toward }
    }
}

/// Replays a fixed list of serves, cycling when exhausted
#[derive(Debug, Clone, Default)]
pub struct ScriptedServe {
    serves: VecDeque<Serve>,
}

impl ScriptedServe {
    pub fn new(serves: impl IntoIterator<Item = Serve>) -> Self {
        Self {
            serves: serves.into_iter().collect(),
        }
    }

    /// Always serve flat toward `side`
    pub fn flat(side: Side) -> Self {
        Self::new([Serve::new(0.0, side)])
    }
}

impl ServeSource for ScriptedServe {
    fn next_serve(&mut self, max_angle: f32) -> Serve {
        match self.serves.pop_front() {
            Some(serve) => {
                self.serves.push_back(serve);
                Serve {
                    angle: serve.angle.clamp(-max_angle, max_angle),
                    ..serve
                }
            }
            None => Serve::new(0.0, Side::Right),
        }
    }
}
