//! Bounding sphere geometry.
//!
//! Every collision in the game is a sphere-sphere overlap test. Spheres are
//! built once from the per-mesh spheres of a model and then only move.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere used as a conservative collision proxy for a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Sphere center in world space.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a sphere from a center and radius.
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Merges per-mesh spheres into one enclosing sphere with its vertical
    /// center dropped to 0.
    ///
    /// Returns `None` for an empty mesh list.
    ///
    /// # Example
    ///
    /// ```
    /// use debris_core::geometry::BoundingSphere;
    /// use glam::Vec3;
    ///
    /// let merged = BoundingSphere::from_meshes(&[
    ///     BoundingSphere::new(Vec3::new(-1.0, 3.0, 0.0), 1.0),
    ///     BoundingSphere::new(Vec3::new(1.0, 3.0, 0.0), 1.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(merged.center, Vec3::ZERO);
    /// assert!((merged.radius - 2.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn from_meshes(meshes: &[Self]) -> Option<Self> {
        let (first, rest) = meshes.split_first()?;
        let mut merged = rest.iter().fold(*first, |acc, sphere| acc.merged(sphere));
        merged.center.y = 0.0;
        Some(merged)
    }

    /// Returns the smallest sphere enclosing both `self` and `other`.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let offset = other.center - self.center;
        let distance = offset.length();

        if distance + other.radius <= self.radius {
            return *self;
        }
        if distance + self.radius <= other.radius {
            return *other;
        }

        let radius = (distance + self.radius + other.radius) * 0.5;
        // distance > 0 here, otherwise one sphere would contain the other
        let center = self.center + offset * ((radius - self.radius) / distance);
        Self { center, radius }
    }

    /// Returns a copy with the radius multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            center: self.center,
            radius: self.radius * factor,
        }
    }

    /// Returns a copy centered at `center`.
    #[must_use]
    pub fn at(&self, center: Vec3) -> Self {
        Self {
            center,
            radius: self.radius,
        }
    }

    /// Returns true if the spheres overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }
}
