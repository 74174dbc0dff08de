//! The player ship.
//!
//! Each running tick the ship turns by the look delta, builds a candidate
//! position from the held movement actions, and commits it only if it stays
//! inside the arena and clear of live debris. There is no sliding: a rejected
//! candidate leaves the ship where it was.

use glam::{Mat3, Mat4, Vec2, Vec3};

use super::{Body, Debris, Elevation, FuelCell};
use crate::config::{GameConfig, ShipConfig};
use crate::host::Model;
use crate::input::{Actions, InputFrame};

/// Player-controlled craft.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    body: Body,
    heading: f32,
    pitch: f32,
    tuning: ShipConfig,
}

impl Ship {
    /// Builds a ship at the origin facing +Z.
    #[must_use]
    pub fn new(model: &Model, config: &GameConfig) -> Self {
        Self {
            body: Body::new(model, config.spheres.ship, Elevation::Follow),
            heading: 0.0,
            pitch: 0.0,
            tuning: config.ship.clone(),
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

    /// Rotation about the vertical axis, in radians.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Aim pitch, in radians. Positive aims down.
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Applies one tick of input: turn, aim, then move if the move is valid.
    ///
    /// Returns true if the ship moved.
    pub fn update(&mut self, input: &InputFrame, debris: &[Debris]) -> bool {
        self.steer(input.look);

        let candidate = self.candidate_position(input.actions);
        if candidate == self.position() || !self.validate_movement(candidate, debris) {
            return false;
        }
        self.body.set_position(candidate);
        true
    }

    /// Turns the heading by `look.x` and tilts the aim by `look.y`.
    ///
    /// A pitch change that would leave the open aim range is dropped whole.
    pub fn steer(&mut self, look: Vec2) {
        self.heading += look.x * self.tuning.turn_speed;

        let pitch = self.pitch + look.y * self.tuning.turn_speed;
        if pitch.abs() < self.tuning.pitch_limit {
            self.pitch = pitch;
        }
    }

    /// Position the held movement actions would take the ship to this tick.
    #[must_use]
    pub fn candidate_position(&self, actions: Actions) -> Vec3 {
        let mut movement = Vec3::ZERO;

        if actions.contains(Actions::FORWARD) {
            movement.z = 1.0;
        } else if actions.contains(Actions::BACK) {
            movement.z = -1.0;
        }

        if actions.contains(Actions::STRAFE_LEFT) {
            movement.x = 1.0;
        } else if actions.contains(Actions::STRAFE_RIGHT) {
            movement.x = -1.0;
        }

        // Ascend wins over descend when both are held
        if actions.contains(Actions::DESCEND) {
            movement.y = -1.0;
        }
        if actions.contains(Actions::ASCEND) {
            movement.y = 1.0;
        }

        let velocity = Mat3::from_rotation_y(self.heading) * movement * self.tuning.velocity;
        self.position() + velocity
    }

    /// Returns true if the ship may occupy `candidate`.
    ///
    /// Rejects positions outside the arena range, outside the open altitude
    /// band, or whose sphere would overlap any debris that is still standing.
    #[must_use]
    pub fn validate_movement(&self, candidate: Vec3, debris: &[Debris]) -> bool {
        let tuning = &self.tuning;
        if candidate.x.abs() > tuning.max_range || candidate.z.abs() > tuning.max_range {
            return false;
        }
        if candidate.y <= tuning.altitude_floor || candidate.y >= tuning.altitude_ceiling {
            return false;
        }

        let sphere = self.body.sphere_at(candidate);
        !debris
            .iter()
            .any(|d| !d.destroyed && sphere.intersects(&d.body().sphere()))
    }

    /// Collects at most one fuel cell the ship is touching.
    ///
    /// The first cell (in slice order) that is not yet retrieved and overlaps
    /// the ship is marked retrieved; the scan stops there.
    pub fn check_for_fuel_collision(&self, fuel_cells: &mut [FuelCell]) -> bool {
        let sphere = self.body.sphere();
        match fuel_cells
            .iter_mut()
            .find(|cell| !cell.retrieved && sphere.intersects(&cell.body().sphere()))
        {
            Some(cell) => {
                cell.retrieved = true;
                true
            }
            None => false,
        }
    }

    /// Returns the ship to the origin with a level heading and aim.
    pub fn reset(&mut self) {
        self.body.set_position(Vec3::ZERO);
        self.heading = 0.0;
        self.pitch = 0.0;
    }

    /// World transform: aim, then heading, then translation.
    #[must_use]
    pub fn world_transform(&self) -> Mat4 {
        self.body.translation()
            * Mat4::from_rotation_y(self.heading)
            * Mat4::from_rotation_x(self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_models::sphere_model;
    use std::f32::consts::FRAC_PI_2;

    fn ship() -> Ship {
        Ship::new(&sphere_model("Models/fuelcarrier", 0, 2.5), &GameConfig::default())
    }

    fn debris_at(position: Vec3) -> Debris {
        let mut debris = Debris::new(&sphere_model("Models/cube10uR", 1, 10.0), 0, 0.7, 2.0);
        debris.place(position);
        debris
    }

    /// Lifts the ship off the ground so horizontal moves validate.
    fn airborne() -> Ship {
        let mut ship = ship();
        ship.body.set_position(Vec3::new(0.0, 10.0, 0.0));
        ship
    }

    mod steering_tests {
        use super::*;

        #[test]
        fn look_x_turns_heading() {
            let mut ship = ship();
            ship.steer(Vec2::new(10.0, 0.0));
            assert!((ship.heading() - 0.1).abs() < 1e-6);
        }

        #[test]
        fn pitch_within_bound_is_applied() {
            let mut ship = ship();
            ship.steer(Vec2::new(0.0, 140.0));
            assert!((ship.pitch() - 1.4).abs() < 1e-5);
        }

        #[test]
        fn pitch_beyond_bound_is_dropped_not_clamped() {
            let mut ship = ship();
            ship.steer(Vec2::new(0.0, 140.0));
            ship.steer(Vec2::new(0.0, 20.0));
            assert!((ship.pitch() - 1.4).abs() < 1e-5);
        }

        #[test]
        fn single_oversized_pitch_delta_is_dropped() {
            let mut ship = ship();
            ship.steer(Vec2::new(0.0, -160.0));
            assert!(ship.pitch().abs() < 1e-6);
        }

        #[test]
        fn heading_still_turns_when_pitch_is_dropped() {
            let mut ship = ship();
            ship.steer(Vec2::new(5.0, 500.0));
            assert!((ship.heading() - 0.05).abs() < 1e-6);
            assert!(ship.pitch().abs() < 1e-6);
        }
    }

    mod movement_tests {
        use super::*;

        #[test]
        fn forward_moves_along_heading() {
            let ship = airborne();
            let candidate = ship.candidate_position(Actions::FORWARD);
            assert!((candidate - Vec3::new(0.0, 10.0, 0.75)).length() < 1e-6);
        }

        #[test]
        fn movement_rotates_by_heading_only() {
            let mut ship = airborne();
            ship.heading = FRAC_PI_2;
            ship.pitch = 1.0;
            let candidate = ship.candidate_position(Actions::FORWARD);
            assert!((candidate - Vec3::new(0.75, 10.0, 0.0)).length() < 1e-5);
        }

        #[test]
        fn forward_beats_back_and_left_beats_right() {
            let ship = airborne();
            let all = Actions::FORWARD | Actions::BACK | Actions::STRAFE_LEFT | Actions::STRAFE_RIGHT;
            let candidate = ship.candidate_position(all);
            assert!((candidate - Vec3::new(0.75, 10.0, 0.75)).length() < 1e-6);
        }

        #[test]
        fn ascend_beats_descend() {
            let ship = airborne();
            let candidate = ship.candidate_position(Actions::ASCEND | Actions::DESCEND);
            assert!((candidate.y - 10.75).abs() < 1e-6);
        }

        #[test]
        fn update_commits_valid_move() {
            let mut ship = airborne();
            assert!(ship.update(&InputFrame::new(Actions::FORWARD), &[]));
            assert!((ship.position().z - 0.75).abs() < 1e-6);
            assert_eq!(ship.body().sphere().center, ship.position());
        }

        #[test]
        fn grounded_ship_must_climb_first() {
            let mut ship = ship();
            assert!(!ship.update(&InputFrame::new(Actions::FORWARD), &[]));
            assert_eq!(ship.position(), Vec3::ZERO);

            assert!(ship.update(&InputFrame::new(Actions::ASCEND), &[]));
            assert!((ship.position().y - 0.75).abs() < 1e-6);
        }

        #[test]
        fn rejected_move_does_not_slide() {
            let mut ship = airborne();
            ship.body.set_position(Vec3::new(97.5, 10.0, 0.0));
            let input = InputFrame::new(Actions::FORWARD | Actions::STRAFE_LEFT);
            assert!(!ship.update(&input, &[]));
            assert_eq!(ship.position(), Vec3::new(97.5, 10.0, 0.0));
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn rejects_outside_range() {
            let ship = ship();
            assert!(!ship.validate_movement(Vec3::new(98.1, 10.0, 0.0), &[]));
            assert!(!ship.validate_movement(Vec3::new(0.0, 10.0, -98.1), &[]));
            assert!(ship.validate_movement(Vec3::new(98.0, 10.0, -98.0), &[]));
        }

        #[test]
        fn rejects_altitude_band_edges() {
            let ship = ship();
            assert!(!ship.validate_movement(Vec3::new(0.0, 0.0, 0.0), &[]));
            assert!(!ship.validate_movement(Vec3::new(0.0, 150.0, 0.0), &[]));
            assert!(ship.validate_movement(Vec3::new(0.0, 0.01, 0.0), &[]));
            assert!(ship.validate_movement(Vec3::new(0.0, 149.9, 0.0), &[]));
        }

        #[test]
        fn live_debris_blocks_and_destroyed_debris_does_not() {
            let ship = ship();
            let mut debris = vec![debris_at(Vec3::new(20.0, 8.0, 20.0))];
            let candidate = Vec3::new(20.0, 10.0, 14.0);

            assert!(!ship.validate_movement(candidate, &debris));
            debris[0].destroyed = true;
            assert!(ship.validate_movement(candidate, &debris));
        }

        #[test]
        fn distant_debris_does_not_block() {
            let ship = ship();
            let debris = vec![debris_at(Vec3::new(50.0, 10.0, 50.0))];
            assert!(ship.validate_movement(Vec3::new(0.0, 10.0, 0.0), &debris));
        }
    }

    mod fuel_tests {
        use super::*;

        fn cell_at(x: f32, z: f32) -> FuelCell {
            let mut cell = FuelCell::new(&sphere_model("Models/fuelcell", 2, 4.0), 0.5);
            cell.place(Vec3::new(x, 0.0, z));
            cell
        }

        #[test]
        fn picks_first_touching_cell_only() {
            let mut ship = airborne();
            ship.body.set_position(Vec3::new(20.0, 1.0, 20.0));
            let mut cells = vec![cell_at(-50.0, -50.0), cell_at(20.0, 21.0), cell_at(21.0, 20.0)];

            assert!(ship.check_for_fuel_collision(&mut cells));
            assert!(!cells[0].retrieved);
            assert!(cells[1].retrieved);
            assert!(!cells[2].retrieved);
        }

        #[test]
        fn pickup_is_idempotent_per_cell() {
            let mut ship = airborne();
            ship.body.set_position(Vec3::new(20.0, 1.0, 20.0));
            let mut cells = vec![cell_at(20.0, 20.0)];

            assert!(ship.check_for_fuel_collision(&mut cells));
            assert!(!ship.check_for_fuel_collision(&mut cells));
        }

        #[test]
        fn high_ship_misses_ground_cells() {
            let mut ship = airborne();
            ship.body.set_position(Vec3::new(20.0, 60.0, 20.0));
            let mut cells = vec![cell_at(20.0, 20.0)];
            assert!(!ship.check_for_fuel_collision(&mut cells));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn beyond_range_is_rejected(
                far in 98.001f32..1000.0,
                near in -98.0f32..98.0,
                y in 1.0f32..149.0,
                negate in any::<bool>(),
                on_x in any::<bool>(),
            ) {
                let ship = ship();
                let far = if negate { -far } else { far };
                let candidate = if on_x {
                    Vec3::new(far, y, near)
                } else {
                    Vec3::new(near, y, far)
                };
                prop_assert!(!ship.validate_movement(candidate, &[]));
            }

            #[test]
            fn outside_altitude_band_is_rejected(
                x in -98.0f32..98.0,
                z in -98.0f32..98.0,
                low in -500.0f32..=0.0,
                high in 150.0f32..500.0,
            ) {
                let ship = ship();
                prop_assert!(!ship.validate_movement(Vec3::new(x, low, z), &[]));
                prop_assert!(!ship.validate_movement(Vec3::new(x, high, z), &[]));
            }

            #[test]
            fn inside_open_box_is_accepted(
                x in -98.0f32..=98.0,
                z in -98.0f32..=98.0,
                y in 0.001f32..149.999,
            ) {
                prop_assert!(ship().validate_movement(Vec3::new(x, y, z), &[]));
            }

            #[test]
            fn pitch_never_leaves_bound(deltas in prop::collection::vec(-300.0f32..300.0, 0..50)) {
                let mut ship = ship();
                for dy in deltas {
                    ship.steer(Vec2::new(0.0, dy));
                    prop_assert!(ship.pitch().abs() < 1.5);
                }
            }
        }
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut ship = airborne();
        ship.steer(Vec2::new(30.0, 40.0));
        ship.reset();

        assert_eq!(ship.position(), Vec3::ZERO);
        assert_eq!(ship.body().sphere().center, Vec3::ZERO);
        assert!(ship.heading().abs() < f32::EPSILON);
        assert!(ship.pitch().abs() < f32::EPSILON);
    }
}
