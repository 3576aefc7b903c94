use crate::error::KdTreeResult;
use crate::{Point, PointIndex, Rect};
use std::collections::BTreeSet;

/// Brute force point set. Every query is a linear scan over the points.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: BTreeSet<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self {
            points: BTreeSet::new(),
        }
    }

    pub fn from_iterator<It>(it: It) -> KdTreeResult<Self>
    where
        It: Iterator<Item = Point>,
    {
        let mut res = Self::new();
        res.extend(it)?;
        Ok(res)
    }

    pub fn extend<It>(&mut self, it: It) -> KdTreeResult<()>
    where
        It: Iterator<Item = Point>,
    {
        for p in it {
            self.insert(p)?;
        }
        Ok(())
    }

    /// Points in `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter()
    }

    pub fn nearest_with_distance(&self, point: Point) -> KdTreeResult<Option<(Point, f64)>> {
        let point = point.validate()?;
        let mut best: Option<(Point, f64)> = None;
        for p in self.points.iter() {
            let d = p.distance_squared_to(&point);
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((*p, d)),
            }
        }
        Ok(best)
    }
}

impl PointIndex for PointSet {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn insert(&mut self, point: Point) -> KdTreeResult<bool> {
        let point = point.validate()?;
        Ok(self.points.insert(point))
    }

    fn contains(&self, point: Point) -> KdTreeResult<bool> {
        let point = point.validate()?;
        Ok(self.points.contains(&point))
    }

    fn range(&self, rect: &Rect) -> Vec<Point> {
        self.points
            .iter()
            .filter(|p| rect.contains(p))
            .copied()
            .collect()
    }

    fn nearest(&self, point: Point) -> KdTreeResult<Option<Point>> {
        self.nearest_with_distance(point)
            .map(|best| best.map(|(p, _)| p))
    }
}
