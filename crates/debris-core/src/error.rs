//! Error types for the simulation core.
//!
//! The per-frame simulation never fails: rejected moves are dropped and a lost
//! round is a normal outcome. Errors only arise at the edges, when a session is
//! built from configuration and assets, or when a new round cannot be laid out.

use thiserror::Error;

/// Errors produced while building or resetting a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// A configuration value is outside its allowed range.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field (e.g. `ship.velocity`).
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: String,
    },

    /// The asset loader has no model with this name.
    #[error("missing asset: {name}")]
    MissingAsset {
        /// Model name that was requested.
        name: String,
    },

    /// A model was loaded but carries no mesh bounding spheres.
    #[error("model {name} has no meshes")]
    EmptyModel {
        /// Model name that was loaded.
        name: String,
    },

    /// Layout sampling gave up before finding a free position.
    #[error("no free position for {entity} #{index} after {attempts} attempts")]
    LayoutExhausted {
        /// Kind of entity being placed.
        entity: &'static str,
        /// Slot index within its list.
        index: usize,
        /// Number of samples drawn before giving up.
        attempts: u32,
    },
}

/// Convenience alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
