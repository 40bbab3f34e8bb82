//! Board-agnostic core logic for Glint robot eyes
//!
//! This crate contains everything that does not depend on a specific
//! panel or bus:
//!
//! - Eye geometry (white region, pupil, eyelid polygons)
//! - Expression presets (normal, anger, surprise, gaze)
//! - The `Eyes` coordinator that paints both eyes and presents a frame
//! - The `Canvas` drawing trait
//! - Configuration types and a small TOML reader for them

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod expression;
pub mod eye;
pub mod eyelid;
pub mod eyes;
pub mod geometry;
pub mod traits;

pub use expression::{Direction, Expression, Side};
pub use eye::Eye;
pub use eyes::{Eyes, EyesError};
