//! Headless runner: replays a recorded input tape through a session and
//! reports how the game went.
//!
//! Usage:
//!   cargo run -p debris-headless -- <tape.json> [--seed N] [--config tuning.json]
//!   RUST_LOG=debris_core=debug cargo run -p debris-headless -- <tape.json>
//!
//! A tape is a JSON array of entries. Each entry is an input frame plus an
//! optional repeat count:
//!
//! ```json
//! [
//!   { "actions": "CONFIRM" },
//!   { "actions": "", "repeat": 2 },
//!   { "actions": "FORWARD | ASCEND | FIRE", "look": [2.0, 0.0], "repeat": 120 }
//! ]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use debris_core::camera::CameraMatrices;
use debris_core::geometry::BoundingSphere;
use debris_core::host::{AssetLoader, AudioSink, Model, ModelHandle, Renderer, SoundId};
use debris_core::hud::Hud;
use debris_core::{hash_session, GameConfig, GameResult, GameState, InputFrame, Session, TickOutcome};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "debris-headless")]
#[command(about = "Replay a Debris Destroyer input tape without a window")]
struct Args {
    /// Path to the JSON input tape
    tape_file: PathBuf,

    /// Seed for the arena layout
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Optional JSON tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bounding sphere radius given to every stub model
    #[arg(long, default_value_t = 5.0)]
    model_radius: f32,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// One tape entry: a frame held for `repeat` ticks.
#[derive(Debug, Deserialize)]
struct TapeEntry {
    #[serde(flatten)]
    frame: InputFrame,
    #[serde(default = "one")]
    repeat: u32,
}

const fn one() -> u32 {
    1
}

/// Outcome of a replay.
#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    quit: bool,
    state: GameState,
    level: i32,
    score: i32,
    fuel: i32,
    debris_destroyed: usize,
    fuel_cells_collected: usize,
    sounds: HashMap<String, usize>,
    draw_calls: usize,
    state_hash: String,
}

// =============================================================================
// Stub Host
// =============================================================================

/// Hands out a single sphere of fixed radius for every model name.
struct StubLoader {
    radius: f32,
    next: u32,
}

impl AssetLoader for StubLoader {
    fn load(&mut self, name: &str) -> GameResult<Model> {
        self.next += 1;
        tracing::debug!(name, handle = self.next, "stub model");
        Model::new(
            name,
            ModelHandle::new(self.next),
            &[BoundingSphere::new(Vec3::ZERO, self.radius)],
        )
    }
}

/// Logs and counts sounds.
#[derive(Default)]
struct LoggingAudio {
    counts: HashMap<String, usize>,
}

impl AudioSink for LoggingAudio {
    fn play(&mut self, sound: SoundId) {
        tracing::trace!(?sound, "play");
        *self.counts.entry(format!("{sound:?}")).or_default() += 1;
    }
}

/// Counts draw calls.
#[derive(Default)]
struct CountingRenderer {
    draws: usize,
}

impl Renderer for CountingRenderer {
    fn draw_model(&mut self, _model: ModelHandle, _world: Mat4, _camera: &CameraMatrices) {
        self.draws += 1;
    }

    fn draw_screen(&mut self, _state: GameState, _hud: &Hud) {
        self.draws += 1;
    }
}

// =============================================================================
// Main
// =============================================================================

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn load_tape(path: &Path) -> Result<Vec<TapeEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tape {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid tape {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let tape = load_tape(&args.tape_file)?;
    tracing::info!(entries = tape.len(), seed = args.seed, "tape loaded");

    let mut loader = StubLoader {
        radius: args.model_radius,
        next: 0,
    };
    let mut session =
        Session::new(config, &mut loader, args.seed).context("failed to start session")?;
    let mut audio = LoggingAudio::default();
    let mut renderer = CountingRenderer::default();

    let mut quit = false;
    'tape: for entry in &tape {
        for _ in 0..entry.repeat {
            let outcome = session
                .tick(entry.frame, &mut audio)
                .with_context(|| format!("tick {} failed", session.frame()))?;
            if outcome == TickOutcome::Quit {
                quit = true;
                break 'tape;
            }
            session.render(&mut renderer);
        }
    }

    let summary = Summary {
        seed: args.seed,
        ticks: session.frame(),
        quit,
        state: session.state(),
        level: session.level(),
        score: session.score(),
        fuel: session.fuel(),
        debris_destroyed: session.arena().destroyed_count(),
        fuel_cells_collected: session.fuel_cells().iter().filter(|c| c.retrieved).count(),
        sounds: audio.counts,
        draw_calls: renderer.draws,
        state_hash: format!("{:016x}", hash_session(&session)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== REPLAY SUMMARY ===");
        println!("  Seed:       {}", summary.seed);
        println!("  Ticks:      {}", summary.ticks);
        println!("  Quit:       {}", summary.quit);
        println!("  State:      {:?}", summary.state);
        println!("  Level:      {}", summary.level);
        println!("  Pay:        ${}", summary.score);
        println!("  Fuel:       {}", summary.fuel);
        println!(
            "  Debris:     {} / {}",
            summary.debris_destroyed,
            session.debris().len()
        );
        println!("  Fuel cells: {}", summary.fuel_cells_collected);
        println!("  Draw calls: {}", summary.draw_calls);
        println!("  State hash: {}", summary.state_hash);
    }

    Ok(())
}
