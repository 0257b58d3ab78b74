//! Key state to control intent mapping
//!
//! Frontends report which keys are held each frame. Steering follows the
//! held keys directly; pause and restart fire once per press.

use std::collections::HashSet;

use crate::sim::{Steer, TickInput};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    P,
    R,
    Escape,
}

impl Key {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" => Some(Key::W),
            "s" => Some(Key::S),
            "up" | "arrowup" => Some(Key::Up),
            "down" | "arrowdown" => Some(Key::Down),
            "p" => Some(Key::P),
            "r" => Some(Key::R),
            "esc" | "escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Keys held during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFrame {
    held: HashSet<Key>,
}

impl KeyFrame {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// One line of driver input: an optional frame delta and the held keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLine {
    pub dt: Option<f32>,
    pub keys: KeyFrame,
}

impl FrameLine {
    /// Parse `"[dt] key key ..."`; unknown tokens are skipped
    pub fn parse(line: &str) -> Self {
        let mut dt = None;
        let mut keys = HashSet::new();
        for token in line.split_whitespace() {
            if let Some(key) = Key::from_name(token) {
                keys.insert(key);
            } else if let Ok(value) = token.parse::<f32>() {
                dt = Some(value);
            } else {
                log::warn!("Ignoring unknown key {token:?}");
            }
        }
        Self {
            dt,
            keys: KeyFrame { held: keys },
        }
    }
}

/// Intents derived from one frame of keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub input: TickInput,
    pub quit: bool,
}

/// Tracks the previous frame to detect fresh presses
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    previous: KeyFrame,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, frame: &KeyFrame) -> Controls {
        let pressed = |key| frame.is_held(key) && !self.previous.is_held(key);
        let controls = Controls {
            input: TickInput {
                left: Steer::from_held(frame.is_held(Key::W), frame.is_held(Key::S)),
                right: Steer::from_held(frame.is_held(Key::Up), frame.is_held(Key::Down)),
                toggle_pause: pressed(Key::P),
                restart: pressed(Key::R),
            },
            quit: frame.is_held(Key::Escape),
        };
        self.previous = frame.clone();
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line = FrameLine::parse("0.016 W up bogus");
        assert_eq!(line.dt, Some(0.016));
        assert!(line.keys.is_held(Key::W));
        assert!(line.keys.is_held(Key::Up));
        assert!(!line.keys.is_held(Key::S));
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(FrameLine::parse("   "), FrameLine::default());
    }

    #[test]
    fn test_steering_is_level_based() {
        let mut keyboard = Keyboard::new();
        let frame = KeyFrame::new([Key::W, Key::Down]);
        for _ in 0..3 {
            let controls = keyboard.update(&frame);
            assert_eq!(controls.input.left, Steer::Up);
            assert_eq!(controls.input.right, Steer::Down);
        }
        let controls = keyboard.update(&KeyFrame::default());
        assert_eq!(controls.input.left, Steer::Stop);
        assert_eq!(controls.input.right, Steer::Stop);
    }

    #[test]
    fn test_pause_fires_once_per_press() {
        let mut keyboard = Keyboard::new();
        let held = KeyFrame::new([Key::P]);
        assert!(keyboard.update(&held).input.toggle_pause);
        assert!(!keyboard.update(&held).input.toggle_pause);
        assert!(!keyboard.update(&KeyFrame::default()).input.toggle_pause);
        assert!(keyboard.update(&held).input.toggle_pause);
    }

    #[test]
    fn test_restart_and_quit() {
        let mut keyboard = Keyboard::new();
        let controls = keyboard.update(&KeyFrame::new([Key::R, Key::Escape]));
        assert!(controls.input.restart);
        assert!(controls.quit);
    }
}
