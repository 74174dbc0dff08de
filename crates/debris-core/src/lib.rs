//! # Debris Core
//!
//! Simulation core for Debris Destroyer, a small arcade flyer: pilot a ship
//! around a square arena, shoot every piece of floating debris, and pick up
//! fuel cells before the tank runs dry.
//!
//! The crate is engine agnostic. Rendering, audio and asset loading go through
//! the traits in [`host`]; input arrives as one [`InputFrame`] per tick.
//!
//! ## Modules
//!
//! - **geometry / entity**: bounding spheres and the ship, fuel cells, debris
//!   and bullets built on them
//! - **arena**: the entities of one round and their random layout
//! - **session**: the per-frame state machine (menus, gameplay, results)
//! - **camera / hud**: view matrices and overlay data for the renderer
//! - **config / error**: tuning and the error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use debris_core::{GameConfig, InputFrame, Session};
//!
//! let mut session = Session::new(GameConfig::default(), &mut loader, seed)?;
//! loop {
//!     let outcome = session.tick(poll_input(), &mut audio)?;
//!     session.render(&mut renderer);
//!     if outcome == TickOutcome::Quit {
//!         break;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod camera;
pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod hash;
pub mod host;
pub mod hud;
pub mod input;
pub mod session;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use hash::hash_session;
pub use input::{Actions, InputFrame};
pub use session::{GameState, Session, TickOutcome};

#[cfg(test)]
mod tests;
