//! Planar geometry for the corridor.
//!
//! `Point2` uses `f64` coordinates.  The movement policy normalizes direction
//! vectors by distances that shrink towards zero as agents approach their
//! exit, so single precision is not enough here.

use std::ops::{Add, Mul, Sub};

/// A point (or displacement) in the corridor plane.
///
/// `x` is the primary flow axis: entrances sit at `x = 0`, exits at
/// `x = width`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (other - self).norm()
    }

    /// Position reached by moving `step` units from `self` straight towards
    /// `target`.
    ///
    /// Returns `None` when `self == target`: the direction is undefined and
    /// the caller decides what "already there" means.  A `step` larger than
    /// the remaining distance overshoots past `target`.
    pub fn step_toward(self, target: Point2, step: f64) -> Option<Point2> {
        let distance = self.distance(target);
        if distance == 0.0 {
            return None;
        }
        Some(self + (target - self) * (step / distance))
    }

    /// `[x, y]` array, the layout used by the spatial index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    #[inline]
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    #[inline]
    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<[f64; 2]> for Point2 {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Point2 { x, y }
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle `[min, max]`, inclusive on every edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    /// The corridor `[0, 0] × [width, height]`.
    pub fn corridor(width: f64, height: f64) -> Self {
        Self { min: Point2::ORIGIN, max: Point2::new(width, height) }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// `true` if `p` lies inside or on the edge of the rectangle.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Clamp each coordinate of `p` independently into the rectangle.
    #[inline]
    pub fn clamp(&self, p: Point2) -> Point2 {
        Point2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }
}
