//! Host collaborator seams.
//!
//! Rendering, audio and asset loading belong to the host engine. The core
//! only talks to them through the traits in this module:
//!
//! - [`AssetLoader`]: resolves a model name to a [`Model`] (opaque handle plus mesh spheres)
//! - [`AudioSink`]: fire-and-forget sound playback
//! - [`Renderer`]: receives one draw call per visible entity and one per screen
//!
//! All traits are object safe so hosts can pass `&mut dyn` trait objects.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::camera::CameraMatrices;
use crate::error::{GameError, GameResult};
use crate::geometry::BoundingSphere;
use crate::hud::Hud;
use crate::session::GameState;

/// Opaque render handle issued by the host's asset loader.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(u32);

impl ModelHandle {
    /// Wraps a raw host handle.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host handle.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// A loaded model as seen by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    handle: ModelHandle,
    bounds: BoundingSphere,
}

impl Model {
    /// Builds a model from its host handle and per-mesh bounding spheres.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyModel`] if `mesh_spheres` is empty.
    pub fn new(
        name: impl Into<String>,
        handle: ModelHandle,
        mesh_spheres: &[BoundingSphere],
    ) -> GameResult<Self> {
        let name = name.into();
        let bounds = BoundingSphere::from_meshes(mesh_spheres)
            .ok_or_else(|| GameError::EmptyModel { name: name.clone() })?;
        Ok(Self {
            name,
            handle,
            bounds,
        })
    }

    /// Asset name the model was loaded from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host render handle.
    #[must_use]
    pub const fn handle(&self) -> ModelHandle {
        self.handle
    }

    /// Merged bounding sphere, vertical center at 0, unscaled.
    #[must_use]
    pub const fn bounds(&self) -> BoundingSphere {
        self.bounds
    }
}

/// Resolves model names to loaded models.
pub trait AssetLoader {
    /// Loads (or fetches from cache) the named model.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MissingAsset`] or [`GameError::EmptyModel`].
    fn load(&mut self, name: &str) -> GameResult<Model>;
}

/// Sound effects the simulation triggers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    /// A menu screen was confirmed.
    MenuAdvance,
    /// A fuel cell was collected.
    Refuel,
    /// A debris was destroyed.
    Explosion,
    /// A bullet was fired.
    Laser,
}

/// Fire-and-forget audio playback.
pub trait AudioSink {
    /// Plays a sound once.
    fn play(&mut self, sound: SoundId);
}

/// Receives draw calls for one frame.
pub trait Renderer {
    /// Draws a model with the given world transform.
    fn draw_model(&mut self, model: ModelHandle, world: Mat4, camera: &CameraMatrices);

    /// Draws a full-screen state (menus, result screens) or the running HUD.
    fn draw_screen(&mut self, state: GameState, hud: &Hud);
}

impl<T: AudioSink + ?Sized> AudioSink for &mut T {
    fn play(&mut self, sound: SoundId) {
        (**self).play(sound);
    }
}

impl<T: AssetLoader + ?Sized> AssetLoader for &mut T {
    fn load(&mut self, name: &str) -> GameResult<Model> {
        (**self).load(name)
    }
}

/// Audio sink that drops every sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: SoundId) {}
}
