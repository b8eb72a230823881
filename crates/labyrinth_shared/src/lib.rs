//! # LABYRINTH Shared
//!
//! Common types used by the generator and the host collaborators.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a random source
//! - rendering or physics crates
//!
//! Anything stochastic belongs in `labyrinth_procedural`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    ALIGNMENT_TOLERANCE, DEFAULT_MAZE_LENGTH, DEFAULT_NUMBER_OF_TJUNCTIONS, MIN_MAZE_LENGTH,
    PLAYER_TAG, RESET_DELAY_SECS, UNLIMITED_APPEARANCES,
};
pub use math::{Quaternion, Transform, Vec3};
