//! Twin Pong entry point
//!
//! Headless frame driver: each stdin line is one frame (`[dt] key key ...`),
//! the simulation runs on a fixed timestep, and every frame's view is
//! written to stdout as one JSON line. Escape or end of input quits.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use twin_pong::consts::*;
use twin_pong::input::{FrameLine, Keyboard};
use twin_pong::{Arena, Session, TickInput};

/// Command line options
#[derive(Debug, Default)]
struct Options {
    arena_path: Option<String>,
    seed: Option<u64>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    let seed = value
                        .parse::<u64>()
                        .map_err(|e| format!("bad seed {value:?}: {e}"))?;
                    options.seed = Some(seed);
                }
                _ if options.arena_path.is_none() && !arg.starts_with("--") => {
                    options.arena_path = Some(arg);
                }
                _ => return Err(format!("unexpected argument {arg:?}")),
            }
        }
        Ok(options)
    }
}

/// Game instance plus frame pacing state
struct Game {
    session: Session,
    keyboard: Keyboard,
    /// One-shot intents waiting for the next substep
    pending: TickInput,
    accumulator: f32,
}

impl Game {
    fn new(arena: Arena, seed: u64) -> Self {
        Self {
            session: Session::seeded(arena, seed),
            keyboard: Keyboard::new(),
            pending: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Run simulation substeps for one frame. Returns false on quit.
    fn update(&mut self, line: &FrameLine) -> bool {
        let controls = self.keyboard.update(&line.keys);
        if controls.quit {
            return false;
        }

        self.pending.toggle_pause |= controls.input.toggle_pause;
        self.pending.restart |= controls.input.restart;

        let dt = match line.dt {
            Some(dt) if dt.is_finite() => dt.clamp(0.0, MAX_FRAME_DT),
            Some(_) => 0.0,
            None => SIM_DT,
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                toggle_pause: self.pending.toggle_pause,
                restart: self.pending.restart,
                ..controls.input
            };
            self.session.step(&input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = TickInput::default();
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        true
    }
}

fn load_arena(path: Option<&str>) -> Result<Arena> {
    match path {
        Some(path) => Arena::load(path).with_context(|| format!("loading arena {path}")),
        None => Ok(Arena::default()),
    }
}

fn run(options: Options) -> Result<()> {
    let arena = load_arena(options.arena_path.as_deref())?;
    let seed = options.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {seed}");

    let mut game = Game::new(arena, seed);
    let stdin = io::stdin();
    let mut out = io::BufWriter::new(io::stdout().lock());

    for line in stdin.lock().lines() {
        let line = FrameLine::parse(&line.context("reading frame from stdin")?);
        if !game.update(&line) {
            log::info!("Quit requested");
            break;
        }
        serde_json::to_writer(&mut out, &game.session.snapshot())
            .context("writing frame view")?;
        out.write_all(b"\n")?;
    }
    out.flush().context("flushing frame output")?;

    let score = game.session.score();
    log::info!("Final score {} - {}", score.left, score.right);
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Twin Pong (headless) starting...");

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: twin-pong [ARENA.json] [--seed N]");
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("An error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}
