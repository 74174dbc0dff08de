//! Tuning configuration for a session.
//!
//! Every gameplay constant lives here and is handed to constructors
//! explicitly. `Default` reproduces the shipped tuning; hosts may deserialize
//! partial overrides since every section is `#[serde(default)]`.
//!
//! # Example
//!
//! ```
//! use debris_core::config::GameConfig;
//!
//! let config = GameConfig::default();
//! assert_eq!(config.fuel.max, 2500);
//! assert!(config.validate().is_ok());
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Ship movement and aim tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Distance travelled per frame along each active movement axis.
    pub velocity: f32,
    /// Radians of heading/pitch per unit of look delta.
    pub turn_speed: f32,
    /// Maximum |x| and |z| the ship may occupy.
    pub max_range: f32,
    /// Pitch must stay strictly inside `(-pitch_limit, pitch_limit)`.
    pub pitch_limit: f32,
    /// Exclusive lower altitude bound.
    pub altitude_floor: f32,
    /// Exclusive upper altitude bound.
    pub altitude_ceiling: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            velocity: 0.75,
            turn_speed: 0.01,
            max_range: 98.0,
            pitch_limit: 1.5,
            altitude_floor: 0.0,
            altitude_ceiling: 150.0,
        }
    }
}

/// Bullet flight and fire-rate tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Travel distance at launch, before the first update.
    pub initial_distance: f32,
    /// Multiplier applied to the travel distance every update.
    pub growth: f32,
    /// Frame count at which a bullet is removed.
    pub lifetime_frames: u32,
    /// Frames between trigger checks.
    pub fire_interval: u32,
    /// Score added per debris destroyed.
    pub hit_reward: i32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            initial_distance: 1.0,
            growth: 1.2,
            lifetime_frames: 25,
            fire_interval: 10,
            hit_reward: 50,
        }
    }
}

/// Fuel tank tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Tank capacity and the amount restored on every new round.
    pub max: i32,
    /// Fuel added per fuel cell collected, capped at `max`.
    pub pickup_bonus: i32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            max: 2500,
            pickup_bonus: 500,
        }
    }
}

/// Arena layout tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of fuel cells per round.
    pub fuel_cells: usize,
    /// Number of debris per round.
    pub debris: usize,
    /// Smallest sampled |x| / |z| (inclusive).
    pub min_distance: i32,
    /// Largest sampled |x| / |z| (exclusive).
    pub max_distance: i32,
    /// Two entities closer than this on both axes overlap.
    pub separation: i32,
    /// Debris altitude is sampled from `0..debris_max_height`.
    pub debris_max_height: i32,
    /// Vertical offset of a debris sphere above its position.
    pub debris_sphere_lift: f32,
    /// Samples drawn for one entity before layout gives up.
    pub max_attempts: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fuel_cells: 15,
            debris: 30,
            min_distance: 10,
            max_distance: 90,
            separation: 15,
            debris_max_height: 150,
            debris_sphere_lift: 2.0,
            max_attempts: 10_000,
        }
    }
}

/// Load-time bounding sphere radius multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereScales {
    /// Ship sphere scale.
    pub ship: f32,
    /// Fuel cell sphere scale.
    pub fuel_cell: f32,
    /// Debris sphere scale.
    pub debris: f32,
    /// Bullet sphere scale.
    pub bullet: f32,
}

impl Default for SphereScales {
    fn default() -> Self {
        Self {
            ship: 0.8,
            fuel_cell: 0.5,
            debris: 0.7,
            bullet: 0.8,
        }
    }
}

/// Chase camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye offset from the ship in ship-local space.
    pub head_offset: Vec3,
    /// Look-at offset from the ship in ship-local space.
    pub target_offset: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near_clip: f32,
    /// Far clip plane distance.
    pub far_clip: f32,
    /// Viewport width divided by height.
    pub aspect_ratio: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            head_offset: Vec3::new(0.0, 5.0, -15.0),
            target_offset: Vec3::new(0.0, 5.0, 0.0),
            fov_degrees: 45.0,
            near_clip: 1.0,
            far_clip: 1000.0,
            aspect_ratio: 853.0 / 480.0,
        }
    }
}

/// Asset names requested from the host loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelNames {
    /// Player ship model.
    pub ship: String,
    /// Fuel cell model.
    pub fuel_cell: String,
    /// Bullet model.
    pub bullet: String,
    /// Terrain model drawn under the arena.
    pub ground: String,
    /// Debris shape variants, selected at random per slot.
    pub debris_shapes: Vec<String>,
}

impl Default for ModelNames {
    fn default() -> Self {
        Self {
            ship: "Models/fuelcarrier".to_string(),
            fuel_cell: "Models/fuelcell".to_string(),
            bullet: "Models/bullet4".to_string(),
            ground: "Models/ground".to_string(),
            debris_shapes: vec![
                "Models/cube10uR".to_string(),
                "Models/cylinder10uR".to_string(),
                "Models/pyramid10uR".to_string(),
            ],
        }
    }
}

/// Complete tuning for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ship tuning.
    pub ship: ShipConfig,
    /// Bullet tuning.
    pub bullet: BulletConfig,
    /// Fuel tuning.
    pub fuel: FuelConfig,
    /// Layout tuning.
    pub layout: LayoutConfig,
    /// Sphere scale factors.
    pub spheres: SphereScales,
    /// Camera tuning.
    pub camera: CameraConfig,
    /// Asset names.
    pub models: ModelNames,
}

impl GameConfig {
    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> GameResult<()> {
        positive("ship.velocity", self.ship.velocity)?;
        positive("ship.turn_speed", self.ship.turn_speed)?;
        positive("ship.max_range", self.ship.max_range)?;
        positive("ship.pitch_limit", self.ship.pitch_limit)?;
        if self.ship.altitude_floor >= self.ship.altitude_ceiling {
            return Err(invalid("ship.altitude_floor", "must be below altitude_ceiling"));
        }

        positive("bullet.initial_distance", self.bullet.initial_distance)?;
        if self.bullet.growth < 1.0 {
            return Err(invalid("bullet.growth", "must be at least 1.0"));
        }
        if self.bullet.lifetime_frames == 0 {
            return Err(invalid("bullet.lifetime_frames", "must be nonzero"));
        }
        if self.bullet.fire_interval == 0 {
            return Err(invalid("bullet.fire_interval", "must be nonzero"));
        }

        if self.fuel.max <= 0 {
            return Err(invalid("fuel.max", "must be positive"));
        }
        if self.fuel.pickup_bonus < 0 {
            return Err(invalid("fuel.pickup_bonus", "must not be negative"));
        }
        if self.fuel.pickup_bonus > self.fuel.max {
            return Err(invalid("fuel.pickup_bonus", "must not exceed fuel.max"));
        }

        let layout = &self.layout;
        if layout.min_distance < 0 {
            return Err(invalid("layout.min_distance", "must not be negative"));
        }
        if layout.min_distance >= layout.max_distance {
            return Err(invalid("layout.min_distance", "must be below max_distance"));
        }
        if layout.max_distance > MAX_LAYOUT_DISTANCE {
            return Err(invalid("layout.max_distance", "must be at most 10000"));
        }
        if layout.separation < 0 {
            return Err(invalid("layout.separation", "must not be negative"));
        }
        if layout.debris_max_height <= 0 {
            return Err(invalid("layout.debris_max_height", "must be positive"));
        }
        if layout.max_attempts == 0 {
            return Err(invalid("layout.max_attempts", "must be nonzero"));
        }

        positive("spheres.ship", self.spheres.ship)?;
        positive("spheres.fuel_cell", self.spheres.fuel_cell)?;
        positive("spheres.debris", self.spheres.debris)?;
        positive("spheres.bullet", self.spheres.bullet)?;

        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("camera.near_clip", self.camera.near_clip)?;
        positive("camera.aspect_ratio", self.camera.aspect_ratio)?;
        if self.camera.far_clip <= self.camera.near_clip {
            return Err(invalid("camera.far_clip", "must be beyond near_clip"));
        }

        if self.models.debris_shapes.is_empty() {
            return Err(invalid("models.debris_shapes", "must name at least one model"));
        }
        Ok(())
    }
}

/// Coordinate differences in the layout must fit an `i32`.
const MAX_LAYOUT_DISTANCE: i32 = 10_000;

fn invalid(field: &'static str, reason: &str) -> GameError {
    GameError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}
