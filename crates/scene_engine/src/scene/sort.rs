//! Child ordering
//!
//! Containers are kept in descending order: the child with the highest depth
//! comes first in the registry. The X and Y axes do NOT sort by position; they
//! sort by depth and only use the named axis to break exact depth ties.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::node::Node;

/// Comparator selection for a container's deferred sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAxis {
    /// Descending depth
    #[default]
    Z,
    /// Descending depth, exact ties broken by descending `position.x`
    X,
    /// Descending depth, exact ties broken by descending `position.y`
    Y,
}

impl SortAxis {
    /// Compare two nodes for this axis
    ///
    /// `-0.0` ties with `0.0`. NaN sorts ahead of every finite depth, so the
    /// order stays total.
    pub fn compare(self, a: &Node, b: &Node) -> Ordering {
        let depth = descending(a.z, b.z);
        if depth != Ordering::Equal {
            return depth;
        }
        match self {
            Self::Z => Ordering::Equal,
            Self::X => descending(a.position.x, b.position.x),
            Self::Y => descending(a.position.y, b.position.y),
        }
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    unsigned_zero(b).total_cmp(&unsigned_zero(a))
}

fn unsigned_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    fn node(z: f32, x: f32, y: f32) -> Node {
        Node::empty().with_z(z).with_position(Vec2::new(x, y))
    }

    #[test]
    fn test_z_descending() {
        let a = node(1.0, 0.0, 0.0);
        let b = node(5.0, 0.0, 0.0);
        assert_eq!(SortAxis::Z.compare(&a, &b), Ordering::Greater);
        assert_eq!(SortAxis::Z.compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_z_ignores_position() {
        let a = node(2.0, 10.0, 0.0);
        let b = node(2.0, 90.0, 0.0);
        assert_eq!(SortAxis::Z.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_x_axis_is_depth_first() {
        // Higher depth wins even though its x is smaller
        let deep = node(3.0, 0.0, 0.0);
        let right = node(1.0, 500.0, 0.0);
        assert_eq!(SortAxis::X.compare(&deep, &right), Ordering::Less);
    }

    #[test]
    fn test_x_axis_breaks_ties() {
        let left = node(1.0, 10.0, 0.0);
        let right = node(1.0, 20.0, 0.0);
        assert_eq!(SortAxis::X.compare(&left, &right), Ordering::Greater);
        assert_eq!(SortAxis::Y.compare(&left, &right), Ordering::Equal);
    }

    #[test]
    fn test_signed_zero_depths_tie() {
        let negative = node(-0.0, 10.0, 0.0);
        let positive = node(0.0, 20.0, 0.0);
        assert_eq!(SortAxis::Z.compare(&negative, &positive), Ordering::Equal);
        // The tie falls through to the axis
        assert_eq!(SortAxis::X.compare(&negative, &positive), Ordering::Greater);
    }

    #[test]
    fn test_nan_depth_is_ordered_consistently() {
        let nan = node(f32::NAN, 0.0, 0.0);
        let deep = node(100.0, 0.0, 0.0);
        assert_eq!(SortAxis::Z.compare(&nan, &deep), Ordering::Less);
        assert_eq!(SortAxis::Z.compare(&deep, &nan), Ordering::Greater);
    }

    #[test]
    fn test_y_axis_breaks_ties() {
        let top = node(0.0, 0.0, 5.0);
        let bottom = node(0.0, 0.0, 50.0);
        assert_eq!(SortAxis::Y.compare(&top, &bottom), Ordering::Greater);
    }
}
