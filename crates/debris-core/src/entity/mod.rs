//! Entity module for the arena simulation.
//!
//! Every placed object embeds a [`Body`]: a position plus the bounding sphere
//! that follows it. Entity-specific state sits beside the body in its own
//! struct:
//! - [`Ship`]: the player craft, driven by input
//! - [`FuelCell`]: collectible, flagged once retrieved
//! - [`Debris`]: obstacle, flagged once destroyed
//! - [`Bullet`]: projectile fired by the ship
//!
//! # Example
//!
//! ```
//! use debris_core::entity::{Body, Elevation};
//! use debris_core::geometry::BoundingSphere;
//! use debris_core::host::{Model, ModelHandle};
//! use glam::Vec3;
//!
//! let model = Model::new(
//!     "Models/cube10uR",
//!     ModelHandle::new(1),
//!     &[BoundingSphere::new(Vec3::ZERO, 10.0)],
//! )
//! .unwrap();
//!
//! let mut body = Body::new(&model, 0.7, Elevation::Lifted(2.0));
//! body.set_position(Vec3::new(20.0, 40.0, -30.0));
//!
//! assert_eq!(body.sphere().center, Vec3::new(20.0, 42.0, -30.0));
//! assert!((body.sphere().radius - 7.0).abs() < 1e-5);
//! ```

mod bullet;
pub mod components;
mod ship;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::BoundingSphere;
use crate::host::{Model, ModelHandle};

pub use bullet::Bullet;
pub use components::{Debris, FuelCell};
pub use ship::Ship;

/// How a body's sphere center follows its vertical position.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Elevation {
    /// Sphere center stays at y = 0.
    Ground,
    /// Sphere center y equals position y.
    Follow,
    /// Sphere center y equals position y plus a fixed lift.
    Lifted(f32),
}

impl Elevation {
    fn center_for(self, position: Vec3) -> Vec3 {
        match self {
            Self::Ground => Vec3::new(position.x, 0.0, position.z),
            Self::Follow => position,
            Self::Lifted(lift) => Vec3::new(position.x, position.y + lift, position.z),
        }
    }
}

/// Position and bounding sphere shared by every entity.
///
/// # Invariants
///
/// - The sphere center always matches the position on x and z, and on y
///   according to the body's [`Elevation`].
/// - The radius is fixed once the body is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec3,
    sphere: BoundingSphere,
    elevation: Elevation,
    model: ModelHandle,
}

impl Body {
    /// Builds a body at the origin from a model's merged sphere, scaling the
    /// radius once by `scale`.
    #[must_use]
    pub fn new(model: &Model, scale: f32, elevation: Elevation) -> Self {
        let position = Vec3::ZERO;
        Self {
            position,
            sphere: model.bounds().scaled(scale).at(elevation.center_for(position)),
            elevation,
            model: model.handle(),
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Current bounding sphere.
    #[must_use]
    pub const fn sphere(&self) -> BoundingSphere {
        self.sphere
    }

    /// Render handle of the model this body was built from.
    #[must_use]
    pub const fn model(&self) -> ModelHandle {
        self.model
    }

    /// Moves the body and re-centers its sphere.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.sphere = self.sphere_at(position);
    }

    /// The sphere this body would have at `position`.
    #[must_use]
    pub fn sphere_at(&self, position: Vec3) -> BoundingSphere {
        self.sphere.at(self.elevation.center_for(position))
    }

    /// Translation-only world transform.
    #[must_use]
    pub fn translation(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }
}
