//! Bullets fired by the ship.
//!
//! A bullet freezes the ship's position, heading and aim at launch and then
//! flies along that line with a travel distance that grows geometrically,
//! so it starts slow and accelerates away.

use glam::{Mat3, Vec3};

use super::{Body, Debris, Elevation, Ship};
use crate::config::GameConfig;
use crate::host::Model;

/// Projectile in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    body: Body,
    origin: Vec3,
    heading: f32,
    pitch: f32,
    distance: f32,
    growth: f32,
    frames: u32,
}

impl Bullet {
    /// Launches a bullet from the ship's current pose.
    #[must_use]
    pub fn launch(ship: &Ship, model: &Model, config: &GameConfig) -> Self {
        let mut body = Body::new(model, config.spheres.bullet, Elevation::Follow);
        body.set_position(ship.position());
        Self {
            body,
            origin: ship.position(),
            heading: ship.heading(),
            pitch: ship.pitch(),
            distance: config.bullet.initial_distance,
            growth: config.bullet.growth,
            frames: 0,
        }
    }

    /// Position and sphere.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Distance from the launch point along the flight line.
    #[must_use]
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    /// Number of updates since launch.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Advances the bullet one frame along its launch line.
    pub fn update(&mut self) {
        self.distance *= self.growth;
        let aim = Mat3::from_rotation_y(self.heading) * Mat3::from_rotation_x(self.pitch);
        let offset = aim * Vec3::new(0.0, 0.0, self.distance);
        self.body.set_position(self.origin + offset);
        self.frames += 1;
    }

    /// Destroys the first standing debris the bullet overlaps.
    ///
    /// Returns true on a hit. At most one debris is destroyed per call.
    pub fn check_for_collision(&self, debris: &mut [Debris]) -> bool {
        let sphere = self.body.sphere();
        match debris
            .iter_mut()
            .find(|d| !d.destroyed && sphere.intersects(&d.body().sphere()))
        {
            Some(hit) => {
                hit.destroyed = true;
                true
            }
            None => false,
        }
    }

    /// True once the bullet has lived `lifetime` frames.
    #[must_use]
    pub const fn is_expired(&self, lifetime: u32) -> bool {
        self.frames >= lifetime
    }
}
