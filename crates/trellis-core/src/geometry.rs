//! Geometric primitives shared by the source and target object models.
//!
//! This module provides the fundamental geometric types used throughout Trellis
//! for expressing placement, bounds and transforms of diagram elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle defined by its top-left corner and size
//! - [`Matrix`] - A 2D affine transform (2×2 linear part plus translation)
//!
//! # Coordinate System
//!
//! Both object models use a screen-style coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are in radians and grow clockwise on screen (from +X towards +Y).
//!
//! # Matrix Convention
//!
//! [`Matrix`] uses the row-vector convention: a point `(x, y)` maps to
//! `(x·m11 + y·m21 + dx, x·m12 + y·m22 + dy)`. Composition is spelled out with
//! [`Matrix::then`], which applies `self` first and the argument second.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance used when comparing coordinates that went through floating-point math.
pub const EPSILON: f64 = 1e-9;

/// Returns `true` when two values are equal within [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Returns the angle, in radians, of the vector from `from` to `to` measured
/// against the positive X axis.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::{Point, points_angle};
/// let angle = points_angle(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
/// assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn points_angle(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(13.0, 24.0);
///
/// assert_eq!(p1.distance(p2), 5.0);
/// assert_eq!(p2.sub_point(p1), Point::new(3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Calculates the Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        other.sub_point(self).hypot()
    }

    /// Returns `true` when both coordinates are equal within [`EPSILON`]
    pub fn approx_eq(self, other: Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle given by its top-left corner and its size.
///
/// Width and height are expected to be non-negative; [`Rect::from_points`]
/// normalizes arbitrary corner pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner coordinates and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The unit square `[0,1]×[0,1]`
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Creates the smallest rectangle containing all the given points.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Point, Rect};
    /// let rect = Rect::from_points([Point::new(4.0, 1.0), Point::new(-2.0, 3.0)]).unwrap();
    /// assert_eq!(rect, Rect::new(-2.0, 1.0, 6.0, 2.0));
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Returns the x-coordinate of the left edge
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the top edge
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the width of the rectangle
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height of the rectangle
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the x-coordinate of the right edge
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Returns the y-coordinate of the bottom edge
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Returns the top-left corner
    pub fn location(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the size of the rectangle
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the top-left, top-right and bottom-left corners.
    ///
    /// These three points span the rectangle's basis: mapping them through a
    /// transform and measuring the two edges recovers the transformed size.
    pub fn basis_points(self) -> [Point; 3] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Returns all four corners in clockwise order starting at the top-left
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }
}

/// Error returned when inverting a matrix whose determinant is zero.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("matrix is not invertible (determinant {determinant})")]
pub struct SingularMatrix {
    /// The determinant of the matrix that failed to invert
    pub determinant: f64,
}

/// A 2D affine transform.
///
/// See the [module documentation](self) for the row-vector convention.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::{Matrix, Point};
/// let placement = Matrix::rotation(std::f64::consts::FRAC_PI_2).then(Matrix::translation(10.0, 0.0));
/// let mapped = placement.transform_point(Point::new(1.0, 0.0));
/// assert!(mapped.approx_eq(Point::new(10.0, 1.0)));
///
/// // Dividing by a transform removes it again
/// let relative = placement.divide(Matrix::translation(10.0, 0.0)).unwrap();
/// assert!(relative.transform_point(Point::new(1.0, 0.0)).approx_eq(Point::new(0.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    m11: f64,
    m12: f64,
    m21: f64,
    m22: f64,
    dx: f64,
    dy: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Creates a matrix from its six components
    pub fn new(m11: f64, m12: f64, m21: f64, m22: f64, dx: f64, dy: f64) -> Self {
        Self {
            m11,
            m12,
            m21,
            m22,
            dx,
            dy,
        }
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure translation
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// A rotation about the origin by `angle` radians
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// A scaling about the origin
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Returns the horizontal translation component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Returns the vertical translation component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Returns the determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Returns `true` if every component matches the identity within [`EPSILON`]
    pub fn is_identity(&self) -> bool {
        let identity = Self::identity();
        approx_eq(self.m11, identity.m11)
            && approx_eq(self.m12, identity.m12)
            && approx_eq(self.m21, identity.m21)
            && approx_eq(self.m22, identity.m22)
            && approx_eq(self.dx, identity.dx)
            && approx_eq(self.dy, identity.dy)
    }

    /// Returns the transform that applies `self` first and `next` second.
    pub fn then(&self, next: Matrix) -> Matrix {
        Matrix {
            m11: self.m11 * next.m11 + self.m12 * next.m21,
            m12: self.m11 * next.m12 + self.m12 * next.m22,
            m21: self.m21 * next.m11 + self.m22 * next.m21,
            m22: self.m21 * next.m12 + self.m22 * next.m22,
            dx: self.dx * next.m11 + self.dy * next.m21 + next.dx,
            dy: self.dx * next.m12 + self.dy * next.m22 + next.dy,
        }
    }

    /// Returns the transform that translates by `(dx, dy)` before applying `self`.
    pub fn prepend_translation(&self, dx: f64, dy: f64) -> Matrix {
        Matrix::translation(dx, dy).then(*self)
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrix`] if the determinant is zero or not finite.
    pub fn inverse(&self) -> Result<Matrix, SingularMatrix> {
        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(SingularMatrix { determinant });
        }

        let m11 = self.m22 / determinant;
        let m12 = -self.m12 / determinant;
        let m21 = -self.m21 / determinant;
        let m22 = self.m11 / determinant;
        Ok(Matrix {
            m11,
            m12,
            m21,
            m22,
            dx: -(self.dx * m11 + self.dy * m21),
            dy: -(self.dx * m12 + self.dy * m22),
        })
    }

    /// Divides `self` by `divisor`: applies `self`, then the inverse of `divisor`.
    ///
    /// For a scene transform and a parent page transform this yields the
    /// placement relative to the parent.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrix`] if `divisor` cannot be inverted.
    pub fn divide(&self, divisor: Matrix) -> Result<Matrix, SingularMatrix> {
        Ok(self.then(divisor.inverse()?))
    }

    /// Maps a point through this transform
    pub fn transform_point(&self, point: Point) -> Point {
        Point::new(
            point.x * self.m11 + point.y * self.m21 + self.dx,
            point.x * self.m12 + point.y * self.m22 + self.dy,
        )
    }

    /// Maps a point through the inverse of this transform.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrix`] if the transform cannot be inverted.
    pub fn invert_point(&self, point: Point) -> Result<Point, SingularMatrix> {
        Ok(self.inverse()?.transform_point(point))
    }
}
