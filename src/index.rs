use crate::error::KdTreeResult;
use crate::{Point, Rect};

/// Set of unique points supporting range and nearest-neighbour queries.
///
/// Implemented by [`KdTree`](crate::KdTree) and by the linear-scan [`PointSet`](crate::PointSet),
/// which serves as its reference.
pub trait PointIndex {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return whether the point was added. Inserting a point already in the set is a no-op.
    fn insert(&mut self, point: Point) -> KdTreeResult<bool>;

    fn contains(&self, point: Point) -> KdTreeResult<bool>;

    /// Every stored point inside `rect`, boundary included, in no particular order.
    fn range(&self, rect: &Rect) -> Vec<Point>;

    /// The stored point closest to `point`, `None` if the set is empty.
    fn nearest(&self, point: Point) -> KdTreeResult<Option<Point>>;
}
