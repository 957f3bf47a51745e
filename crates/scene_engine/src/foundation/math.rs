//! Math utilities and types
//!
//! Provides the 2D math types used by scene traversal. The draw pass works in
//! homogeneous 2D coordinates, so translations are stored as 3x3 matrices.

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (2D affine transform)
pub type Mat3 = Matrix3<f32>;

/// Build a 2D translation matrix
pub fn translation(offset: Vec2) -> Mat3 {
    Mat3::new_translation(&offset)
}

/// Read the translation component of a 2D affine transform
pub fn translation_of(transform: &Mat3) -> Vec2 {
    Vec2::new(transform[(0, 2)], transform[(1, 2)])
}

/// Axis-aligned rectangle in 2D space
///
/// Used as the bounding shape handed to the viewport visibility test and as
/// the clip region of the draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Bounds {
    /// Create bounds from a corner and a size
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec2 {
        self.position
    }

    /// Maximum corner
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Same rectangle moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.position + offset, self.size)
    }

    /// Check whether two rectangles overlap (touching edges count)
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
    }

    /// Check whether a point lies inside the rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Smallest rectangle containing both
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let min = self.min().inf(&other.min());
        let max = self.max().sup(&other.max());
        Self::new(min, max - min)
    }
}
