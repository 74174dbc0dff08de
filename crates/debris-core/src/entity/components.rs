//! Passive arena entities.
//!
//! Fuel cells and debris carry no update logic of their own. Their flags only
//! change through the ship's pickup scan, a bullet's hit scan, or a new layout.

use glam::Vec3;

use super::{Body, Elevation};
use crate::host::Model;

/// Collectible that refuels the ship.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelCell {
    body: Body,
    /// Set once the ship collects the cell; cleared by the next layout.
    pub retrieved: bool,
}

impl FuelCell {
    /// Builds an unplaced fuel cell.
    #[must_use]
    pub fn new(model: &Model, sphere_scale: f32) -> Self {
        Self {
            body: Body::new(model, sphere_scale, Elevation::Ground),
            retrieved: false,
        }
    }

    /// Position and sphere.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Moves the cell to a new layout slot and makes it collectible again.
    pub fn place(&mut self, position: Vec3) {
        self.body.set_position(position);
        self.retrieved = false;
    }
}

/// Obstacle that blocks the ship until shot.
#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    body: Body,
    shape: usize,
    /// Set once a bullet hits the debris.
    pub destroyed: bool,
}

impl Debris {
    /// Builds an unplaced debris using shape variant `shape`.
    ///
    /// The sphere center floats `sphere_lift` above the debris position.
    #[must_use]
    pub fn new(model: &Model, shape: usize, sphere_scale: f32, sphere_lift: f32) -> Self {
        Self {
            body: Body::new(model, sphere_scale, Elevation::Lifted(sphere_lift)),
            shape,
            destroyed: false,
        }
    }

    /// Position and sphere.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Index of the shape variant this debris was built from.
    #[must_use]
    pub const fn shape(&self) -> usize {
        self.shape
    }

    /// Moves the debris to a layout slot.
    pub fn place(&mut self, position: Vec3) {
        self.body.set_position(position);
    }
}
