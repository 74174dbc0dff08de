//! State hashing for replay verification.
//!
//! Two sessions created from the same config and seed and fed the same input
//! tape must hash identically after every tick. Floats are hashed by their
//! bit patterns.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::Vec3;

use crate::entity::Body;
use crate::session::Session;

/// Computes a deterministic hash of the whole session.
///
/// Covers the counters, screen and pause state, the ship pose, every fuel
/// cell and debris (position and flag), and every bullet in flight.
#[must_use]
pub fn hash_session(session: &Session) -> u64 {
    let mut hasher = DefaultHasher::new();

    session.seed().hash(&mut hasher);
    session.frame().hash(&mut hasher);
    session.state().hash(&mut hasher);
    session.is_paused().hash(&mut hasher);
    session.fuel().hash(&mut hasher);
    session.score().hash(&mut hasher);
    session.level().hash(&mut hasher);
    session.fire_timer().hash(&mut hasher);

    let ship = session.ship();
    hash_body(ship.body(), &mut hasher);
    ship.heading().to_bits().hash(&mut hasher);
    ship.pitch().to_bits().hash(&mut hasher);

    for cell in session.fuel_cells() {
        hash_body(cell.body(), &mut hasher);
        cell.retrieved.hash(&mut hasher);
    }

    for debris in session.debris() {
        hash_body(debris.body(), &mut hasher);
        debris.shape().hash(&mut hasher);
        debris.destroyed.hash(&mut hasher);
    }

    session.bullets().len().hash(&mut hasher);
    for bullet in session.bullets() {
        hash_body(bullet.body(), &mut hasher);
        bullet.distance().to_bits().hash(&mut hasher);
        bullet.frames().hash(&mut hasher);
    }

    hasher.finish()
}

fn hash_body<H: Hasher>(body: &Body, hasher: &mut H) {
    hash_vec3(body.position(), hasher);
    hash_vec3(body.sphere().center, hasher);
    body.sphere().radius.to_bits().hash(hasher);
}

fn hash_vec3<H: Hasher>(v: Vec3, hasher: &mut H) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}
