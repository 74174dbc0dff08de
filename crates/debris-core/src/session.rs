//! Session module: the per-frame state machine that runs a game.
//!
//! A `Session` owns the ship, the arena, live bullets and the fuel, pay and
//! level counters. The host calls [`Session::tick`] once per frame with a
//! fresh [`InputFrame`] and then [`Session::render`] to emit draw calls.
//!
//! # Screen Flow
//!
//! ```text
//! Start -> Instruction -> Controls -> Running -> Won  -> Running (level + 1)
//!                                            \-> Lost -> Running (level 1, pay 0)
//! ```
//!
//! Menu screens advance on a confirm press, at most one screen per tick. The
//! tick that enters `Running` also runs the first gameplay step. The won and
//! lost screens wait for confirm to be *released* before starting a round.
//!
//! # Determinism
//!
//! All randomness (debris shapes and layout) comes from a `ChaCha8Rng`
//! seeded at construction, so the same seed and input tape always produce
//! the same session.
//!
//! # Example
//!
//! ```
//! use debris_core::config::GameConfig;
//! use debris_core::geometry::BoundingSphere;
//! use debris_core::host::{AssetLoader, Model, ModelHandle, Silent};
//! use debris_core::error::GameResult;
//! use debris_core::input::{Actions, InputFrame};
//! use debris_core::session::{GameState, Session};
//! use glam::Vec3;
//!
//! struct UnitSpheres(u32);
//!
//! impl AssetLoader for UnitSpheres {
//!     fn load(&mut self, name: &str) -> GameResult<Model> {
//!         self.0 += 1;
//!         Model::new(name, ModelHandle::new(self.0), &[BoundingSphere::new(Vec3::ZERO, 1.0)])
//!     }
//! }
//!
//! let mut session = Session::new(GameConfig::default(), &mut UnitSpheres(0), 42).unwrap();
//! let confirm = InputFrame::new(Actions::CONFIRM);
//! let idle = InputFrame::default();
//!
//! for _ in 0..3 {
//!     session.tick(confirm, &mut Silent).unwrap();
//!     session.tick(idle, &mut Silent).unwrap();
//! }
//!
//! assert_eq!(session.state(), GameState::Running);
//! assert_eq!(session.level(), 1);
//! ```

use glam::Mat4;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::arena::{Arena, ArenaModels};
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::entity::{Bullet, Debris, FuelCell, Ship};
use crate::error::GameResult;
use crate::host::{AssetLoader, AudioSink, Model, Renderer, SoundId};
use crate::hud::Hud;
use crate::input::{Actions, InputEdges, InputFrame};

// =============================================================================
// GameState
// =============================================================================

/// Screen the session is on.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen.
    #[default]
    Start,
    /// How to play.
    Instruction,
    /// Control reference.
    Controls,
    /// Gameplay.
    Running,
    /// Every debris destroyed with fuel to spare.
    Won,
    /// Ran out of fuel.
    Lost,
}

impl GameState {
    /// The screen a confirm press leads to, for menu screens.
    #[must_use]
    pub const fn next_screen(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Instruction),
            Self::Instruction => Some(Self::Controls),
            Self::Controls => Some(Self::Running),
            Self::Running | Self::Won | Self::Lost => None,
        }
    }
}

/// What the host should do after a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Keep running.
    Continue,
    /// The player asked to quit.
    Quit,
}

// =============================================================================
// Session
// =============================================================================

/// Models resolved once at session start.
#[derive(Debug, Clone, PartialEq)]
struct SessionModels {
    ship: Model,
    bullet: Model,
    ground: Model,
    arena: ArenaModels,
}

impl SessionModels {
    fn load<L: AssetLoader + ?Sized>(config: &GameConfig, loader: &mut L) -> GameResult<Self> {
        let names = &config.models;
        let ground = loader.load(&names.ground)?;
        let fuel_cell = loader.load(&names.fuel_cell)?;
        let debris_shapes = names
            .debris_shapes
            .iter()
            .map(|name| loader.load(name))
            .collect::<GameResult<Vec<_>>>()?;
        let ship = loader.load(&names.ship)?;
        let bullet = loader.load(&names.bullet)?;

        Ok(Self {
            ship,
            bullet,
            ground,
            arena: ArenaModels {
                fuel_cell,
                debris_shapes,
            },
        })
    }
}

/// One running game.
///
/// # Invariants
///
/// - `level >= 1`
/// - `fuel <= config.fuel.max`; it may drop to zero or below on the frame
///   the level is lost
/// - No bullet outlives `config.bullet.lifetime_frames` updates
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    rng: ChaCha8Rng,
    seed: u64,
    models: SessionModels,
    ship: Ship,
    camera: Camera,
    arena: Arena,
    bullets: Vec<Bullet>,
    state: GameState,
    paused: bool,
    /// Pause key state, sampled only while running.
    pause_held: bool,
    previous: InputFrame,
    fuel: i32,
    score: i32,
    level: i32,
    fire_timer: u32,
    frame: u64,
}

impl Session {
    /// Validates `config`, loads every model through `loader` and lays out
    /// the first round from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GameError::InvalidConfig`] for a bad config, any
    /// error the loader reports, or [`crate::GameError::LayoutExhausted`].
    pub fn new<L: AssetLoader + ?Sized>(
        config: GameConfig,
        loader: &mut L,
        seed: u64,
    ) -> GameResult<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let models = SessionModels::load(&config, loader)?;
        let arena = Arena::generate(&config, &models.arena, &mut rng)?;
        let ship = Ship::new(&models.ship, &config);
        let camera = Camera::new(config.camera.clone());

        info!(seed, "session created");
        Ok(Self {
            rng,
            seed,
            ship,
            camera,
            arena,
            bullets: Vec::new(),
            state: GameState::Start,
            paused: false,
            pause_held: false,
            previous: InputFrame::default(),
            fuel: config.fuel.max,
            score: 0,
            level: 1,
            fire_timer: config.bullet.fire_interval,
            frame: 0,
            models,
            config,
        })
    }

    /// Advances the session by one frame.
    ///
    /// Order within a tick:
    /// 1. quit check
    /// 2. at most one menu screen advance
    /// 3. the gameplay step, if running (and not paused)
    /// 4. the won/lost continue check
    ///
    /// # Errors
    ///
    /// Only a round reset can fail, with [`crate::GameError::LayoutExhausted`].
    pub fn tick<A: AudioSink + ?Sized>(
        &mut self,
        input: InputFrame,
        audio: &mut A,
    ) -> GameResult<TickOutcome> {
        let previous = std::mem::replace(&mut self.previous, input);
        self.frame += 1;

        if input.held(Actions::QUIT) {
            info!(frame = self.frame, "quit requested");
            return Ok(TickOutcome::Quit);
        }

        let edges = InputEdges::new(&previous, &input);

        if let Some(next) = self.state.next_screen() {
            if edges.pressed(Actions::CONFIRM) {
                audio.play(SoundId::MenuAdvance);
                self.enter(next);
            }
        }

        if self.state == GameState::Running {
            self.run_frame(&input, audio);
        }

        if edges.released(Actions::CONFIRM) {
            match self.state {
                GameState::Won => self.start_round(true)?,
                GameState::Lost => self.start_round(false)?,
                _ => {}
            }
        }

        Ok(TickOutcome::Continue)
    }

    /// Emits the draw calls for the current screen.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let hud = self.hud();
        if self.state != GameState::Running {
            renderer.draw_screen(self.state, &hud);
            return;
        }

        let camera = self.camera.matrices();
        renderer.draw_model(self.models.ground.handle(), Mat4::IDENTITY, camera);
        for cell in self.arena.fuel_cells().iter().filter(|c| !c.retrieved) {
            renderer.draw_model(cell.body().model(), cell.body().translation(), camera);
        }
        for debris in self.arena.debris().iter().filter(|d| !d.destroyed) {
            renderer.draw_model(debris.body().model(), debris.body().translation(), camera);
        }
        for bullet in &self.bullets {
            renderer.draw_model(bullet.body().model(), bullet.body().translation(), camera);
        }
        renderer.draw_model(self.ship.body().model(), self.ship.world_transform(), camera);

        renderer.draw_screen(GameState::Running, &hud);
    }

    // =========================================================================
    // Gameplay step
    // =========================================================================

    fn run_frame<A: AudioSink + ?Sized>(&mut self, input: &InputFrame, audio: &mut A) {
        let pause_now = input.held(Actions::PAUSE);
        if pause_now && !self.pause_held {
            self.paused = !self.paused;
            info!(paused = self.paused, frame = self.frame, "pause toggled");
        }
        self.pause_held = pause_now;
        if self.paused {
            return;
        }

        self.ship.update(input, self.arena.debris());
        self.update_camera();

        if self.ship.check_for_fuel_collision(self.arena.fuel_cells_mut()) {
            audio.play(SoundId::Refuel);
            self.fuel = self
                .fuel
                .saturating_add(self.config.fuel.pickup_bonus)
                .min(self.config.fuel.max);
            debug!(fuel = self.fuel, "fuel cell collected");
        }

        self.fuel -= self.level;

        // Clearing the field wins even on the frame the tank runs dry
        if self.arena.all_destroyed() {
            self.enter(GameState::Won);
        } else if self.fuel <= 0 {
            self.enter(GameState::Lost);
        }

        self.update_fire_timer(input, audio);
        self.update_bullets(audio);
    }

    fn update_fire_timer<A: AudioSink + ?Sized>(&mut self, input: &InputFrame, audio: &mut A) {
        if self.fire_timer != 0 {
            self.fire_timer -= 1;
        }
        if self.fire_timer == 0 {
            if input.held(Actions::FIRE) {
                self.bullets
                    .push(Bullet::launch(&self.ship, &self.models.bullet, &self.config));
                audio.play(SoundId::Laser);
                debug!(live = self.bullets.len(), "bullet fired");
            }
            self.fire_timer = self.config.bullet.fire_interval;
        }
    }

    fn update_bullets<A: AudioSink + ?Sized>(&mut self, audio: &mut A) {
        for bullet in &mut self.bullets {
            bullet.update();
            if bullet.check_for_collision(self.arena.debris_mut()) {
                audio.play(SoundId::Explosion);
                self.score += self.config.bullet.hit_reward;
                debug!(
                    score = self.score,
                    remaining = self.arena.debris().len() - self.arena.destroyed_count(),
                    "debris destroyed"
                );
            }
        }

        let lifetime = self.config.bullet.lifetime_frames;
        self.bullets.retain(|bullet| {
            let expired = bullet.is_expired(lifetime);
            if expired {
                trace!(position = ?bullet.position(), "bullet expired");
            }
            !expired
        });
    }

    fn update_camera(&mut self) {
        self.camera
            .update(self.ship.heading(), self.ship.pitch(), self.ship.position());
    }

    fn enter(&mut self, next: GameState) {
        info!(from = ?self.state, to = ?next, frame = self.frame, "state change");
        self.state = next;
    }

    /// Starts a new round after a result screen.
    fn start_round(&mut self, won: bool) -> GameResult<()> {
        self.ship.reset();
        self.bullets.clear();
        self.update_camera();
        self.arena
            .regenerate(&self.config, &self.models.arena, &mut self.rng)?;
        self.fuel = self.config.fuel.max;

        if won {
            self.level += 1;
        } else {
            self.level = 1;
            self.score = 0;
        }

        info!(level = self.level, score = self.score, "round started");
        self.enter(GameState::Running);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current screen.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// True while gameplay is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fuel left.
    #[must_use]
    pub const fn fuel(&self) -> i32 {
        self.fuel
    }

    /// Wages earned.
    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// Frames until the trigger is next sampled.
    #[must_use]
    pub const fn fire_timer(&self) -> u32 {
        self.fire_timer
    }

    /// Number of ticks processed.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Seed the session was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Tuning in effect.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player ship.
    #[must_use]
    pub const fn ship(&self) -> &Ship {
        &self.ship
    }

    /// The chase camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Bullets in flight.
    #[must_use]
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Fuel cells of the current round.
    #[must_use]
    pub fn fuel_cells(&self) -> &[FuelCell] {
        self.arena.fuel_cells()
    }

    /// Debris of the current round.
    #[must_use]
    pub fn debris(&self) -> &[Debris] {
        self.arena.debris()
    }

    /// The arena of the current round.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Overlay numbers for the renderer.
    #[must_use]
    pub const fn hud(&self) -> Hud {
        Hud {
            fuel_remaining: self.fuel,
            score: self.score,
            level: self.level,
        }
    }

    /// Mutable arena, for scripted scenarios.
    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Overrides the fuel gauge, for scripted scenarios.
    #[cfg(test)]
    pub(crate) fn set_fuel(&mut self, fuel: i32) {
        self.fuel = fuel;
    }
}
