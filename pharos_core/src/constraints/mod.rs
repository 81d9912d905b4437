// pharos_core/src/constraints/mod.rs

//! Axis-aligned geometric constraints on agent motion.
//!
//! A [`Boundary`] describes the rectangle of *permitted* space and corrects
//! violations by clamping each axis independently. An [`ObstacleField`]
//! describes rectangles of *forbidden* space and corrects violations by
//! sliding along obstacle faces. Both are immutable value configuration:
//! build them once per run and hand them to the motion integrator by value,
//! so concurrent runs can never share mutable state.

mod boundary;
mod obstacle;

pub use boundary::Boundary;
pub use obstacle::{Obstacle, ObstacleField};
