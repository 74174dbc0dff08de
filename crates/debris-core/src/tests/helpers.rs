//! Test doubles for the host traits and scenario shortcuts.

use glam::{Mat4, Vec3};

use crate::camera::CameraMatrices;
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::geometry::BoundingSphere;
use crate::host::{AssetLoader, AudioSink, Model, ModelHandle, Renderer, SoundId};
use crate::hud::Hud;
use crate::input::{Actions, InputFrame};
use crate::session::{GameState, Session};

// =============================================================================
// Host Doubles
// =============================================================================

/// Loader that fabricates single-mesh models with per-kind radii.
///
/// Handles are assigned in load order starting at 1.
#[derive(Debug, Default)]
pub struct StubLoader {
    loaded: Vec<String>,
}

impl StubLoader {
    /// Names requested so far, in order.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

impl AssetLoader for StubLoader {
    fn load(&mut self, name: &str) -> GameResult<Model> {
        let radius = match name {
            "Models/fuelcarrier" => 5.0,
            "Models/fuelcell" => 4.0,
            "Models/bullet4" => 1.0,
            "Models/ground" => 100.0,
            "Models/cube10uR" | "Models/cylinder10uR" | "Models/pyramid10uR" => 10.0,
            _ => {
                return Err(GameError::MissingAsset {
                    name: name.to_string(),
                })
            }
        };
        self.loaded.push(name.to_string());

        #[allow(clippy::cast_possible_truncation)]
        let handle = ModelHandle::new(self.loaded.len() as u32);
        Model::new(name, handle, &[BoundingSphere::new(Vec3::ZERO, radius)])
    }
}

/// Audio sink that remembers every sound.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Sounds in play order.
    pub sounds: Vec<SoundId>,
}

impl RecordingAudio {
    /// How many times `sound` was played.
    pub fn count(&self, sound: SoundId) -> usize {
        self.sounds.iter().filter(|&&s| s == sound).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundId) {
        self.sounds.push(sound);
    }
}

/// Renderer that records draw calls.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Model draws in call order.
    pub models: Vec<(ModelHandle, Mat4)>,
    /// Screen draws in call order.
    pub screens: Vec<(GameState, Hud)>,
}

impl Renderer for RecordingRenderer {
    fn draw_model(&mut self, model: ModelHandle, world: Mat4, _camera: &CameraMatrices) {
        self.models.push((model, world));
    }

    fn draw_screen(&mut self, state: GameState, hud: &Hud) {
        self.screens.push((state, *hud));
    }
}

// =============================================================================
// Scenario Setup
// =============================================================================

/// Builds a session with default tuning and the stub loader.
pub fn new_session(seed: u64) -> Session {
    Session::new(GameConfig::default(), &mut StubLoader::default(), seed).unwrap()
}

/// Clicks through the three menu screens.
///
/// Leaves the session running with confirm released.
pub fn confirm_to_running(session: &mut Session, audio: &mut RecordingAudio) {
    for _ in 0..3 {
        session.tick(InputFrame::new(Actions::CONFIRM), audio).unwrap();
        session.tick(InputFrame::default(), audio).unwrap();
    }
    assert_eq!(session.state(), GameState::Running);
}

/// Marks every debris destroyed without firing a shot.
pub fn clear_field(session: &mut Session) {
    for debris in session.arena_mut().debris_mut() {
        debris.destroyed = true;
    }
}

/// Runs one tick with nothing held.
pub fn idle(session: &mut Session, audio: &mut RecordingAudio) {
    session.tick(InputFrame::default(), audio).unwrap();
}

/// Presses then releases confirm over two ticks.
pub fn press_and_release_confirm(session: &mut Session, audio: &mut RecordingAudio) {
    session.tick(InputFrame::new(Actions::CONFIRM), audio).unwrap();
    session.tick(InputFrame::default(), audio).unwrap();
}
