//! 2D-tree over planar points.
//! # Contracts:
//! - Stored points have finite coordinates
//! - Points are unique, re-inserting a point is a no-op
//! - Every node's bounds contain every point of its subtree
//!
pub mod error;
pub mod index;
pub mod kdtree;
pub mod point_set;
pub mod rect;

pub use error::KdTreeError;
pub use index::PointIndex;
pub use kdtree::{Axis, KdTree, Node};
pub use point_set::PointSet;
pub use rect::Rect;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Immutable point in the plane, ordered by `(x, y)`.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        // adding 0.0 turns -0.0 into 0.0, so total ordering agrees with `==`
        Self {
            x: x + 0.0,
            y: y + 0.0,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_squared_to(&self, rhs: &Self) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        dx * dx + dy * dy
    }

    /// Fail with `InvalidArgument` unless both coordinates are finite.
    pub(crate) fn validate(self) -> Result<Self, KdTreeError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(KdTreeError::InvalidArgument(format!(
                "point {} has a non-finite coordinate",
                self
            )))
        }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Point::new(-0.0, 0.5), Point::new(0.0, 0.5));
        assert_eq!(
            Point::new(-0.0, 0.5).cmp(&Point::new(0.0, 0.5)),
            Ordering::Equal
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = Point::new(0.1, 0.9);
        let b = Point::new(0.2, 0.0);
        let c = Point::new(0.2, 0.5);
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn distance_squared() {
        let a = Point::new(0.6, 0.3);
        let b = Point::new(0.75, 0.25);
        assert!((a.distance_squared_to(&b) - 0.025).abs() < 1e-12);
        assert_eq!(a.distance_squared_to(&a), 0.0);
    }

    #[test]
    fn validate_rejects_nan_and_infinity() {
        assert!(Point::new(f64::NAN, 0.0).validate().is_err());
        assert!(Point::new(0.0, f64::INFINITY).validate().is_err());
        assert!(Point::new(1e300, -1e300).validate().is_ok());
    }
}
