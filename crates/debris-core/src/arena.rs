//! Arena module: the fuel cells and debris of one round, and their layout.
//!
//! The Arena owns every passive entity of the current round. A new round
//! rebuilds the debris (each slot picking one of the shape variants at
//! random) and scatters all entities over the four quadrants of the arena.
//!
//! # Layout Rules
//!
//! - Ground coordinates are integers sampled from `min_distance..max_distance`,
//!   each axis negated with probability one half.
//! - A sample is rejected while any already placed entity (or the ship's
//!   spawn point at the origin) lies closer than `separation` on *both* axes.
//! - Fuel cells sit on the ground; debris also get an altitude sampled from
//!   `0..debris_max_height`.
//!
//! # Example
//!
//! ```
//! use debris_core::arena::{Arena, ArenaModels};
//! use debris_core::config::GameConfig;
//! use debris_core::geometry::BoundingSphere;
//! use debris_core::host::{Model, ModelHandle};
//! use glam::Vec3;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let sphere = [BoundingSphere::new(Vec3::ZERO, 5.0)];
//! let models = ArenaModels {
//!     fuel_cell: Model::new("Models/fuelcell", ModelHandle::new(1), &sphere).unwrap(),
//!     debris_shapes: vec![Model::new("Models/cube10uR", ModelHandle::new(2), &sphere).unwrap()],
//! };
//!
//! let config = GameConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let arena = Arena::generate(&config, &models, &mut rng).unwrap();
//!
//! assert_eq!(arena.fuel_cells().len(), 15);
//! assert_eq!(arena.debris().len(), 30);
//! assert!(!arena.all_destroyed());
//! ```

use glam::Vec3;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::{GameConfig, LayoutConfig};
use crate::entity::{Debris, FuelCell};
use crate::error::{GameError, GameResult};
use crate::host::Model;

/// Models the arena builds its entities from.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaModels {
    /// Fuel cell model.
    pub fuel_cell: Model,
    /// Debris shape variants; must not be empty.
    pub debris_shapes: Vec<Model>,
}

/// Passive entities of the current round.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    fuel_cells: Vec<FuelCell>,
    debris: Vec<Debris>,
}

impl Arena {
    /// Builds a fresh round: fuel cells, debris shapes, then the layout.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if `models` has no debris shape, or
    /// [`GameError::LayoutExhausted`] if an entity cannot be placed.
    pub fn generate<R: Rng + ?Sized>(
        config: &GameConfig,
        models: &ArenaModels,
        rng: &mut R,
    ) -> GameResult<Self> {
        let fuel_cells = (0..config.layout.fuel_cells)
            .map(|_| FuelCell::new(&models.fuel_cell, config.spheres.fuel_cell))
            .collect();

        let mut arena = Self {
            fuel_cells,
            debris: Vec::new(),
        };
        arena.regenerate(config, models, rng)?;
        Ok(arena)
    }

    /// Starts a new round in place: rebuilds the debris and lays everything
    /// out again. Fuel cells keep their models and become collectible again.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::generate`].
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        models: &ArenaModels,
        rng: &mut R,
    ) -> GameResult<()> {
        self.debris = build_debris(config, models, rng)?;
        self.place_fuel_cells_and_debris(&config.layout, rng)
    }

    /// Scatters fuel cells, then debris, over the arena.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LayoutExhausted`] if some entity finds no free
    /// spot within `layout.max_attempts` samples.
    pub fn place_fuel_cells_and_debris<R: Rng + ?Sized>(
        &mut self,
        layout: &LayoutConfig,
        rng: &mut R,
    ) -> GameResult<()> {
        // The ship spawns at the origin
        let mut occupied = vec![(0, 0)];

        for (index, cell) in self.fuel_cells.iter_mut().enumerate() {
            let (x, z) = sample_free(layout, rng, &occupied, "fuel cell", index, |_| {})?;
            occupied.push((x, z));
            cell.place(grid_point(x, 0, z));
        }

        for (index, debris) in self.debris.iter_mut().enumerate() {
            let mut y = 0;
            let (x, z) = sample_free(layout, rng, &occupied, "debris", index, |rng| {
                y = rng.gen_range(0..layout.debris_max_height);
            })?;
            occupied.push((x, z));
            debris.place(grid_point(x, y, z));
        }

        debug!(
            fuel_cells = self.fuel_cells.len(),
            debris = self.debris.len(),
            "arena laid out"
        );
        Ok(())
    }

    /// Fuel cells in layout order.
    #[must_use]
    pub fn fuel_cells(&self) -> &[FuelCell] {
        &self.fuel_cells
    }

    /// Mutable fuel cells, for pickup scans.
    #[must_use]
    pub fn fuel_cells_mut(&mut self) -> &mut [FuelCell] {
        &mut self.fuel_cells
    }

    /// Debris in layout order.
    #[must_use]
    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    /// Mutable debris, for hit scans.
    #[must_use]
    pub fn debris_mut(&mut self) -> &mut [Debris] {
        &mut self.debris
    }

    /// Number of debris destroyed so far this round.
    #[must_use]
    pub fn destroyed_count(&self) -> usize {
        self.debris.iter().filter(|d| d.destroyed).count()
    }

    /// True once every debris is destroyed.
    #[must_use]
    pub fn all_destroyed(&self) -> bool {
        self.debris.iter().all(|d| d.destroyed)
    }
}

/// Returns true if `(x, z)` lies closer than `separation` to an occupied
/// spot on both axes.
#[must_use]
pub fn is_occupied(occupied: &[(i32, i32)], x: i32, z: i32, separation: i32) -> bool {
    occupied
        .iter()
        .any(|&(ox, oz)| (x - ox).abs() < separation && (z - oz).abs() < separation)
}

#[allow(clippy::cast_precision_loss)]
fn grid_point(x: i32, y: i32, z: i32) -> Vec3 {
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Creates one debris per slot.
///
/// One shape draw is made up front; each slot takes the pending draw and
/// then draws again, so the final draw is never used.
fn build_debris<R: Rng + ?Sized>(
    config: &GameConfig,
    models: &ArenaModels,
    rng: &mut R,
) -> GameResult<Vec<Debris>> {
    let shapes = models.debris_shapes.len();
    if shapes == 0 {
        return Err(GameError::InvalidConfig {
            field: "models.debris_shapes",
            reason: "must name at least one model".to_string(),
        });
    }

    let mut debris = Vec::with_capacity(config.layout.debris);
    let mut pending = rng.gen_range(0..shapes);
    for _ in 0..config.layout.debris {
        debris.push(Debris::new(
            &models.debris_shapes[pending],
            pending,
            config.spheres.debris,
            config.layout.debris_sphere_lift,
        ));
        pending = rng.gen_range(0..shapes);
    }
    Ok(debris)
}

/// Samples ground coordinates until a free spot is found.
///
/// `extra` runs between the x and z draws of every attempt, so debris
/// altitude is drawn in the same position of the random stream each time.
fn sample_free<R, F>(
    layout: &LayoutConfig,
    rng: &mut R,
    occupied: &[(i32, i32)],
    entity: &'static str,
    index: usize,
    mut extra: F,
) -> GameResult<(i32, i32)>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R),
{
    for _ in 0..layout.max_attempts {
        let mut x = rng.gen_range(layout.min_distance..layout.max_distance);
        extra(rng);
        let mut z = rng.gen_range(layout.min_distance..layout.max_distance);
        if rng.gen_bool(0.5) {
            x = -x;
        }
        if rng.gen_bool(0.5) {
            z = -z;
        }

        if !is_occupied(occupied, x, z, layout.separation) {
            return Ok((x, z));
        }
    }

    warn!(entity, index, attempts = layout.max_attempts, "layout sampling exhausted");
    Err(GameError::LayoutExhausted {
        entity,
        index,
        attempts: layout.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingSphere;
    use crate::host::ModelHandle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn models() -> ArenaModels {
        let sphere = |r| [BoundingSphere::new(Vec3::ZERO, r)];
        ArenaModels {
            fuel_cell: Model::new("Models/fuelcell", ModelHandle::new(1), &sphere(4.0)).unwrap(),
            debris_shapes: vec![
                Model::new("Models/cube10uR", ModelHandle::new(2), &sphere(10.0)).unwrap(),
                Model::new("Models/cylinder10uR", ModelHandle::new(3), &sphere(10.0)).unwrap(),
                Model::new("Models/pyramid10uR", ModelHandle::new(4), &sphere(10.0)).unwrap(),
            ],
        }
    }

    fn ground(position: Vec3) -> (i32, i32) {
        #[allow(clippy::cast_possible_truncation)]
        (position.x as i32, position.z as i32)
    }

    fn all_ground_positions(arena: &Arena) -> Vec<(i32, i32)> {
        arena
            .fuel_cells()
            .iter()
            .map(|c| ground(c.body().position()))
            .chain(arena.debris().iter().map(|d| ground(d.body().position())))
            .collect()
    }

    mod occupancy_tests {
        use super::*;

        #[test]
        fn close_on_both_axes_is_occupied() {
            assert!(is_occupied(&[(20, 20)], 34, 6, 15));
            assert!(is_occupied(&[(20, 20)], 6, 34, 15));
        }

        #[test]
        fn far_on_one_axis_is_free() {
            assert!(!is_occupied(&[(20, 20)], 35, 20, 15));
            assert!(!is_occupied(&[(20, 20)], 20, 5, 15));
        }

        #[test]
        fn origin_spawn_blocks_small_coordinates() {
            assert!(is_occupied(&[(0, 0)], 14, -14, 15));
            assert!(!is_occupied(&[(0, 0)], 15, 10, 15));
        }
    }

    mod generate_tests {
        use super::*;
        use proptest::prelude::*;
        use rand::Rng;

        #[test]
        fn generate_builds_configured_counts() {
            let config = GameConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let arena = Arena::generate(&config, &models(), &mut rng).unwrap();

            assert_eq!(arena.fuel_cells().len(), 15);
            assert_eq!(arena.debris().len(), 30);
            assert_eq!(arena.destroyed_count(), 0);
        }

        #[test]
        fn positions_respect_ranges() {
            let config = GameConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            let arena = Arena::generate(&config, &models(), &mut rng).unwrap();

            for cell in arena.fuel_cells() {
                let p = cell.body().position();
                assert!((10.0..90.0).contains(&p.x.abs()));
                assert!((10.0..90.0).contains(&p.z.abs()));
                assert!(p.y.abs() < f32::EPSILON);
                assert!(!cell.retrieved);
            }
            for debris in arena.debris() {
                let p = debris.body().position();
                assert!((10.0..90.0).contains(&p.x.abs()));
                assert!((10.0..90.0).contains(&p.z.abs()));
                assert!((0.0..150.0).contains(&p.y));
                assert!((debris.body().sphere().center.y - (p.y + 2.0)).abs() < 1e-5);
            }
        }

        #[test]
        fn no_two_entities_share_a_cell() {
            let config = GameConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            let arena = Arena::generate(&config, &models(), &mut rng).unwrap();

            let positions = all_ground_positions(&arena);
            for (i, &(x, z)) in positions.iter().enumerate() {
                assert!(!is_occupied(&positions[..i], x, z, 15));
                assert!(!is_occupied(&[(0, 0)], x, z, 15));
            }
        }

        #[test]
        fn debris_shapes_come_from_variants() {
            let config = GameConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(4);
            let models = models();
            let arena = Arena::generate(&config, &models, &mut rng).unwrap();

            for debris in arena.debris() {
                let model = &models.debris_shapes[debris.shape()];
                assert_eq!(debris.body().model(), model.handle());
            }
        }

        #[test]
        fn shape_of_each_slot_is_the_pending_draw() {
            let config = GameConfig::default();
            let models = models();

            let mut rng = ChaCha8Rng::seed_from_u64(5);
            let debris = build_debris(&config, &models, &mut rng).unwrap();

            // Replay the stream: the draw before slot i is slot i's shape, and
            // one trailing draw is consumed but never shown.
            let mut replay = ChaCha8Rng::seed_from_u64(5);
            let draws: Vec<usize> = (0..=config.layout.debris)
                .map(|_| replay.gen_range(0..3))
                .collect();
            for (slot, d) in debris.iter().enumerate() {
                assert_eq!(d.shape(), draws[slot]);
            }
            assert_eq!(rng.gen::<u64>(), replay.gen::<u64>());
        }

        #[test]
        fn same_seed_same_layout() {
            let config = GameConfig::default();
            let a = Arena::generate(&config, &models(), &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
            let b = Arena::generate(&config, &models(), &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn regenerate_clears_round_state() {
            let config = GameConfig::default();
            let models = models();
            let mut rng = ChaCha8Rng::seed_from_u64(6);
            let mut arena = Arena::generate(&config, &models, &mut rng).unwrap();

            arena.fuel_cells_mut()[0].retrieved = true;
            for debris in arena.debris_mut() {
                debris.destroyed = true;
            }
            assert!(arena.all_destroyed());

            arena.regenerate(&config, &models, &mut rng).unwrap();
            assert!(arena.fuel_cells().iter().all(|c| !c.retrieved));
            assert_eq!(arena.destroyed_count(), 0);
        }

        #[test]
        fn overcrowded_layout_is_exhausted() {
            let mut config = GameConfig::default();
            config.layout.fuel_cells = 200;
            config.layout.max_attempts = 50;
            let mut rng = ChaCha8Rng::seed_from_u64(8);

            match Arena::generate(&config, &models(), &mut rng) {
                Err(GameError::LayoutExhausted { attempts, .. }) => assert_eq!(attempts, 50),
                other => panic!("expected LayoutExhausted, got {other:?}"),
            }
        }

        proptest! {
            #[test]
            fn any_seed_keeps_entities_apart(seed in any::<u64>()) {
                let config = GameConfig::default();
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let arena = Arena::generate(&config, &models(), &mut rng).unwrap();

                let positions = all_ground_positions(&arena);
                prop_assert_eq!(positions.len(), 45);
                for (i, &(x, z)) in positions.iter().enumerate() {
                    prop_assert!(!is_occupied(&positions[..i], x, z, 15));
                    prop_assert!(!is_occupied(&[(0, 0)], x, z, 15));
                }
            }
        }

        #[test]
        fn empty_shape_list_is_rejected() {
            let config = GameConfig::default();
            let mut models = models();
            models.debris_shapes.clear();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            assert!(Arena::generate(&config, &models, &mut rng).is_err());
        }
    }
}
