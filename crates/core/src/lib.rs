#![warn(missing_docs)]
//! Core primitives shared across the workspace: semantic entities coming out
//! of the language pipeline and the block-space geometry used by fill commands.

pub mod entity;
pub mod geometry;

pub use entity::{tags, Entity, EntityError, InvalidPlayerName, PlayerRef};
pub use geometry::{compute_bounds, Bounds, Coordinate, ShapeKind, UnsupportedShape};
