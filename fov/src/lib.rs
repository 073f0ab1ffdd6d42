//! Generic field-of-view computation.
//!
//! Beam-splitting shadowcasting over any ring geometry, with the scan state
//! supplied by the caller.

mod fov;
pub use crate::fov::{Fov, Geometry, State};

mod square;
pub use square::SquareRing;

/// Field of view over square rings, the usual roguelike grid metric.
pub type Square<T, V> = Fov<SquareRing<V>, T>;
