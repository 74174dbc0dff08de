//! Cross-module tests for the session.
//!
//! - `determinism.rs`: same seed and tape give the same session
//! - `integration.rs`: full rounds through the public tick/render API
//! - `helpers.rs`: stub host collaborators and scenario setup

mod helpers;

pub use helpers::*;
