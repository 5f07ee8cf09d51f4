//! Block-space coordinates and fill-shape bounds.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::entity::tags;

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    /// Left/right (or east/west) axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// Depth (forward/backward or south/north) axis.
    pub z: i32,
}

impl Coordinate {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Construct a coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Render as an offset from the executor's position: `~x ~y ~z`.
    pub fn relative(self) -> String {
        format!("~{} ~{} ~{}", self.x, self.y, self.z)
    }

    /// Render as an offset along the executor's facing axes: `^x ^y ^z`.
    pub fn relative_rotated(self) -> String {
        format!("^{} ^{} ^{}", self.x, self.y, self.z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Structural form of a fill request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// One row of blocks along the x axis.
    Line,
    /// A flat square on the horizontal plane.
    Square,
    /// A solid cube.
    Cube,
}

impl ShapeKind {
    /// Parse a shape tag, with or without the `shape:` prefix.
    pub fn from_tag(tag: &str) -> Result<Self, UnsupportedShape> {
        let name = tag.strip_prefix(tags::SHAPE_PREFIX).unwrap_or(tag);
        match name {
            "line" => Ok(Self::Line),
            "square" => Ok(Self::Square),
            "cube" => Ok(Self::Cube),
            _ => Err(UnsupportedShape(tag.to_string())),
        }
    }

    /// Lower-case name of the shape.
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Square => "square",
            Self::Cube => "cube",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = UnsupportedShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// Shape outside of `line`, `square`, `cube`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported shape: {0}")]
pub struct UnsupportedShape(pub String);

/// Inclusive corners of a fill region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Corner with the smallest value on every axis.
    pub from: Coordinate,
    /// Corner with the largest value on every axis.
    pub to: Coordinate,
}

impl Bounds {
    /// Number of blocks spanned along each axis.
    pub fn span(&self) -> Coordinate {
        Coordinate::new(
            self.to.x - self.from.x + 1,
            self.to.y - self.from.y + 1,
            self.to.z - self.from.z + 1,
        )
    }
}

/// Lower end of a centered run of `length` cells.
fn low(length: i32) -> i32 {
    -length / 2
}

/// Upper end of a centered run of `length` cells. Even lengths lean one cell
/// toward the negative side.
fn high(length: i32) -> i32 {
    (length - 1) / 2
}

/// Corners of `shape` centered on the origin with `length` cells per used axis.
///
/// Lengths below one are treated as one so that `from <= to` always holds.
pub fn compute_bounds(shape: ShapeKind, length: i32) -> Bounds {
    let length = length.max(1);
    let (lo, hi) = (low(length), high(length));
    match shape {
        ShapeKind::Line => Bounds {
            from: Coordinate::new(lo, 0, 0),
            to: Coordinate::new(hi, 0, 0),
        },
        ShapeKind::Square => Bounds {
            from: Coordinate::new(lo, 0, lo),
            to: Coordinate::new(hi, 0, hi),
        },
        ShapeKind::Cube => Bounds {
            from: Coordinate::splat(lo),
            to: Coordinate::splat(hi),
        },
    }
}
