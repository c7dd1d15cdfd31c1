//! # Config Crate
//!
//! Centralized configuration constants for the terrain surface pipeline.
//! Working frame extents, tessellation ratios, elevation lookup tuning and
//! print envelope defaults are defined here so every stage agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, WORKING_FRAME_MAX, WORKING_FRAME_MIN};
//!
//! let span = WORKING_FRAME_MAX - WORKING_FRAME_MIN;
//! assert!((span - 20.0).abs() < EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain `const` items and tiny helpers only

pub mod constants;

#[cfg(test)]
mod tests;
