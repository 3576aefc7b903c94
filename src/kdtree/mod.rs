mod iter;

pub use iter::Nodes;

use crate::error::{KdTreeError, KdTreeResult};
use crate::{Point, PointIndex, Rect};
use log::{debug, trace};
use rayon::prelude::*;

/// The coordinate a node compares on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Split by a vertical line, comparing x coordinates.
    Vertical,
    /// Split by a horizontal line, comparing y coordinates.
    Horizontal,
}

impl Axis {
    pub fn flip(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    pub fn coord(self, point: &Point) -> f64 {
        match self {
            Axis::Vertical => point.x(),
            Axis::Horizontal => point.y(),
        }
    }
}

type Link = Option<Box<Node>>;

/// A point of the tree together with the region its subtree is confined to.
///
/// Axis and bounds are fixed when the node is created, only the child links change afterwards.
#[derive(Debug)]
pub struct Node {
    point: Point,
    axis: Axis,
    bounds: Rect,

    left: Link,
    right: Link,
}

impl Node {
    fn new(point: Point, axis: Axis, bounds: Rect) -> Self {
        debug_assert!(bounds.contains(&point), "{} outside {}", point, bounds);
        Self {
            point,
            axis,
            bounds,
            left: None,
            right: None,
        }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Points comparing less than this node's point on its axis.
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    /// Points comparing greater or equal on the axis, excluding the node's own point.
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// End points of the splitting line through this node, clipped to its bounds.
    pub fn split_segment(&self) -> [Point; 2] {
        let b = &self.bounds;
        let (x, y) = (self.point.x(), self.point.y());
        match self.axis {
            Axis::Vertical => [Point::new(x, b.ymin()), Point::new(x, b.ymax())],
            Axis::Horizontal => [Point::new(b.xmin(), y), Point::new(b.xmax(), y)],
        }
    }

    fn goes_left(&self, point: &Point) -> bool {
        self.axis.coord(point) < self.axis.coord(&self.point)
    }

    /// Bounds of the left (`left == true`) or right child.
    fn child_bounds(&self, left: bool) -> Rect {
        let split = self.axis.coord(&self.point);
        match self.axis {
            Axis::Vertical => self.bounds.clamp_x(split, !left),
            Axis::Horizontal => self.bounds.clamp_y(split, !left),
        }
    }
}

/// 2D-tree of unique points.
///
/// The root splits vertically and the axis alternates with depth. Every node records the
/// rectangle it is confined to, which range and nearest queries use to skip whole subtrees.
#[derive(Debug)]
pub struct KdTree {
    universe: Rect,
    root: Link,
    len: usize,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::with_universe(Rect::plane())
    }
}

impl Drop for KdTree {
    fn drop(&mut self) {
        // unlink iteratively, a degenerate tree is as deep as it is long
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl KdTree {
    /// Tree accepting any finite point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree whose root is confined to `universe`. Points outside of it are rejected.
    pub fn with_universe(universe: Rect) -> Self {
        debug!("Creating 2D-tree over {}", universe);
        Self {
            universe,
            root: None,
            len: 0,
        }
    }

    pub fn from_iterator<It>(it: It) -> KdTreeResult<Self>
    where
        It: Iterator<Item = Point>,
    {
        let mut tree = Self::new();
        tree.extend(it)?;
        Ok(tree)
    }

    /// Insert every point, stopping at the first invalid one.
    pub fn extend<It>(&mut self, it: It) -> KdTreeResult<()>
    where
        It: Iterator<Item = Point>,
    {
        for p in it {
            self.insert(p)?;
        }
        Ok(())
    }

    pub fn universe(&self) -> &Rect {
        &self.universe
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Nodes in pre-order.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes::new(self.root())
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.iter().map(Node::point)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = self.root().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Return whether a new node was created. Inserting a point already in the tree is a no-op.
    pub fn insert(&mut self, point: Point) -> KdTreeResult<bool> {
        let point = point.validate()?;
        if !self.universe.contains(&point) {
            return Err(KdTreeError::InvalidArgument(format!(
                "point {} lies outside of {}",
                point, self.universe
            )));
        }

        let mut axis = Axis::Vertical;
        let mut bounds = self.universe;
        let mut depth = 0;
        let mut link = &mut self.root;
        while let Some(node) = link {
            if node.point == point {
                trace!("{} is already present at depth {}", point, depth);
                return Ok(false);
            }
            let left = node.goes_left(&point);
            axis = node.axis.flip();
            bounds = node.child_bounds(left);
            depth += 1;
            link = if left { &mut node.left } else { &mut node.right };
        }
        *link = Some(Box::new(Node::new(point, axis, bounds)));
        self.len += 1;

        trace!("Inserted {} at depth {} within {}", point, depth, bounds);
        Ok(true)
    }

    pub fn contains(&self, point: Point) -> KdTreeResult<bool> {
        let point = point.validate()?;

        let mut current = self.root();
        while let Some(node) = current {
            if node.point == point {
                return Ok(true);
            }
            current = if node.goes_left(&point) {
                node.left()
            } else {
                node.right()
            };
        }
        Ok(false)
    }

    /// All points inside `rect`, boundary included, in no particular order.
    pub fn range(&self, rect: &Rect) -> Vec<Point> {
        let mut out = Vec::new();
        self.range_with(rect, |p| out.push(*p));
        out
    }

    /// Call `f` with every point inside `rect`.
    pub fn range_with<F>(&self, rect: &Rect, mut f: F)
    where
        F: FnMut(&Point),
    {
        let mut visited = 0;
        let mut pruned = 0;
        let mut stack: Vec<&Node> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            // every point of the subtree lies within node.bounds
            if !rect.intersects(&node.bounds) {
                pruned += 1;
                continue;
            }
            visited += 1;
            if rect.contains(&node.point) {
                f(&node.point);
            }
            // the split point says nothing about which side the rectangle reaches, visit both
            stack.extend(node.right());
            stack.extend(node.left());
        }
        trace!(
            "Range {} visited {} nodes, pruned {} subtrees",
            rect,
            visited,
            pruned
        );
    }

    /// The stored point closest to `point`, `None` on an empty tree.
    ///
    /// Of several points at the same distance any one may be returned.
    pub fn nearest(&self, point: Point) -> KdTreeResult<Option<Point>> {
        self.nearest_with_distance(point)
            .map(|best| best.map(|(p, _)| p))
    }

    /// The closest point and its squared distance to `point`.
    pub fn nearest_with_distance(&self, point: Point) -> KdTreeResult<Option<(Point, f64)>> {
        let point = point.validate()?;

        let mut best: Option<(Point, f64)> = None;
        let mut visited = 0;
        let mut pruned = 0;
        let mut stack: Vec<&Node> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            let best_dist = match best {
                Some((_, d)) => d,
                None => {
                    let d = node.point.distance_squared_to(&point);
                    best = Some((node.point, d));
                    d
                }
            };
            // nothing within node.bounds can be strictly closer than the current best
            if best_dist <= node.bounds.distance_squared_to(&point) {
                pruned += 1;
                continue;
            }
            visited += 1;
            let d = node.point.distance_squared_to(&point);
            if d < best_dist {
                best = Some((node.point, d));
            }

            let (near, far) = if node.goes_left(&point) {
                (node.left(), node.right())
            } else {
                (node.right(), node.left())
            };
            // LIFO: the near side is searched first, shrinking the best distance for `far`
            stack.extend(far);
            stack.extend(near);
        }
        trace!(
            "Nearest to {} visited {} nodes, pruned {} subtrees",
            point,
            visited,
            pruned
        );
        Ok(best)
    }

    /// Answer a batch of nearest queries in parallel. Results are in the order of `points`.
    pub fn par_nearest(&self, points: &[Point]) -> KdTreeResult<Vec<Option<Point>>> {
        points.par_iter().map(|p| self.nearest(*p)).collect()
    }

    /// Run a batch of range queries in parallel. Results are in the order of `rects`.
    pub fn par_range(&self, rects: &[Rect]) -> Vec<Vec<Point>> {
        rects.par_iter().map(|r| self.range(r)).collect()
    }
}

impl<'a> IntoIterator for &'a KdTree {
    type Item = &'a Node;
    type IntoIter = Nodes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PointIndex for KdTree {
    fn len(&self) -> usize {
        KdTree::len(self)
    }

    fn insert(&mut self, point: Point) -> KdTreeResult<bool> {
        KdTree::insert(self, point)
    }

    fn contains(&self, point: Point) -> KdTreeResult<bool> {
        KdTree::contains(self, point)
    }

    fn range(&self, rect: &Rect) -> Vec<Point> {
        KdTree::range(self, rect)
    }

    fn nearest(&self, point: Point) -> KdTreeResult<Option<Point>> {
        KdTree::nearest(self, point)
    }
}
