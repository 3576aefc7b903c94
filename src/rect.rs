use crate::error::{KdTreeError, KdTreeResult};
use crate::Point;

/// Closed axis-aligned rectangle `[xmin, xmax] x [ymin, ymax]`.
///
/// Bounds may be infinite, so the whole plane is representable, but never NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Rect {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> KdTreeResult<Self> {
        if xmin.is_nan() || ymin.is_nan() || xmax.is_nan() || ymax.is_nan() {
            return Err(KdTreeError::InvalidArgument(format!(
                "rectangle [{}, {}] x [{}, {}] has a NaN bound",
                xmin, xmax, ymin, ymax
            )));
        }
        if xmin > xmax || ymin > ymax {
            return Err(KdTreeError::InvalidArgument(format!(
                "rectangle [{}, {}] x [{}, {}] is inverted",
                xmin, xmax, ymin, ymax
            )));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// `[0, 1] x [0, 1]`
    pub const fn unit() -> Self {
        Self {
            xmin: 0.0,
            ymin: 0.0,
            xmax: 1.0,
            ymax: 1.0,
        }
    }

    /// The unbounded plane.
    pub const fn plane() -> Self {
        Self {
            xmin: f64::NEG_INFINITY,
            ymin: f64::NEG_INFINITY,
            xmax: f64::INFINITY,
            ymax: f64::INFINITY,
        }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn contains(&self, point: &Point) -> bool {
        let (x, y) = (point.x(), point.y());
        self.xmin <= x && self.ymin <= y && x <= self.xmax && y <= self.ymax
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.xmin <= other.xmin
            && self.ymin <= other.ymin
            && other.xmax <= self.xmax
            && other.ymax <= self.ymax
    }

    /// Rectangles sharing only an edge or a corner intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.xmax < other.xmin || self.xmin > other.xmax {
            return false;
        }
        if self.ymax < other.ymin || self.ymin > other.ymax {
            return false;
        }
        true
    }

    /// Squared distance from `point` to the closest point of the rectangle, 0 inside.
    pub fn distance_squared_to(&self, point: &Point) -> f64 {
        let (x, y) = (point.x(), point.y());
        let dx = if x < self.xmin {
            x - self.xmin
        } else if x > self.xmax {
            x - self.xmax
        } else {
            0.0
        };
        let dy = if y < self.ymin {
            y - self.ymin
        } else if y > self.ymax {
            y - self.ymax
        } else {
            0.0
        };
        dx * dx + dy * dy
    }

    /// Part of the rectangle left of (`upper == false`) or right of the vertical line at `x`.
    pub(crate) fn clamp_x(self, x: f64, upper: bool) -> Self {
        if upper {
            Self { xmin: x, ..self }
        } else {
            Self { xmax: x, ..self }
        }
    }

    /// Part of the rectangle below (`upper == false`) or above the horizontal line at `y`.
    pub(crate) fn clamp_y(self, y: f64, upper: bool) -> Self {
        if upper {
            Self { ymin: y, ..self }
        } else {
            Self { ymax: y, ..self }
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::plane()
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_bounds() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_ok());
        assert!(Rect::new(0.5, 0.5, 0.5, 0.5).is_ok());
        assert!(Rect::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Rect::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(Rect::new(f64::NEG_INFINITY, 0.0, f64::INFINITY, 1.0).is_ok());
    }

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::unit();
        assert!(r.contains(&Point::new(0.0, 0.0)));
        assert!(r.contains(&Point::new(1.0, 1.0)));
        assert!(r.contains(&Point::new(0.5, 1.0)));
        assert!(!r.contains(&Point::new(1.0001, 0.5)));
        assert!(!r.contains(&Point::new(0.5, -0.0001)));
    }

    #[test]
    fn intersects_shared_edge() {
        let a = Rect::new(0.0, 0.0, 0.5, 1.0).unwrap();
        let b = Rect::new(0.5, 0.0, 1.0, 1.0).unwrap();
        let c = Rect::new(0.6, 0.0, 1.0, 1.0).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(Rect::plane().intersects(&c));
    }

    #[test]
    fn distance_squared_to_point() {
        let r = Rect::new(0.5, 0.0, 1.0, 0.5).unwrap();
        assert_eq!(r.distance_squared_to(&Point::new(0.75, 0.25)), 0.0);
        assert!((r.distance_squared_to(&Point::new(0.25, 0.25)) - 0.0625).abs() < 1e-12);
        // corner
        assert!((r.distance_squared_to(&Point::new(1.5, 1.5)) - 1.25).abs() < 1e-12);
        assert_eq!(Rect::plane().distance_squared_to(&Point::new(1e9, -1e9)), 0.0);
    }

    #[test]
    fn clamping_splits_the_rectangle() {
        let r = Rect::unit();
        let left = r.clamp_x(0.5, false);
        let right = r.clamp_x(0.5, true);
        assert_eq!(left, Rect::new(0.0, 0.0, 0.5, 1.0).unwrap());
        assert_eq!(right, Rect::new(0.5, 0.0, 1.0, 1.0).unwrap());
        assert!(r.contains_rect(&left));
        assert!(r.contains_rect(&right));

        let below = right.clamp_y(0.25, false);
        assert_eq!(below, Rect::new(0.5, 0.0, 1.0, 0.25).unwrap());
        assert!(!below.contains_rect(&right));
    }
}
