//! Strongly-typed geometry primitives for pedigree layout (zero-cost newtypes).
//!
//! All coordinates are canvas units (SVG user units), y grows downward.
//! Domain code never passes raw `f64` coordinates around: lengths are
//! `Length`, positions are `Point<Length>`, translations are `Offset<Length>`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in canvas units
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Const-friendly, unchecked constructor for built-in defaults.
    /// Use `try_new` for user-provided values.
    #[inline]
    pub(crate) const fn units(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let len = Length::try_new(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let len = Length::try_non_negative(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else {
            Ok(len)
        }
    }

    #[inline]
    pub fn abs(self) -> Length {
        Length(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Check if this length is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Half of this length. Symbol insets are always half a symbol.
    #[inline]
    pub fn half(self) -> Length {
        Length(self.0 / 2.0)
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

// NOTE: Length / Length is intentionally NOT implemented; layout math never
// needs a ratio of two lengths.

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Length> {
    pub const ORIGIN: Point<Length> = Point { x: Length::ZERO, y: Length::ZERO };

    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub fn new(w: T, h: T) -> Self { Size { w, h } }
}

/// A displacement vector (not an absolute position).
/// Point + Offset = Point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Offset<T> {
    pub fn new(dx: T, dy: T) -> Self {
        Offset { dx, dy }
    }
}

impl Add<Offset<Length>> for Point<Length> {
    type Output = Point<Length>;
    fn add(self, rhs: Offset<Length>) -> Point<Length> {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

impl AddAssign<Offset<Length>> for Point<Length> {
    fn add_assign(&mut self, rhs: Offset<Length>) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl Sub<Point<Length>> for Point<Length> {
    type Output = Offset<Length>;
    fn sub(self, rhs: Point<Length>) -> Offset<Length> {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl Default for BBox<Length> {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox<Length> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Length(f64::MAX), y: Length(f64::MAX) },
            max: Point { x: Length(f64::MIN), y: Length(f64::MIN) },
        }
    }

    /// A degenerate box at a single point
    pub fn at(p: Point<Length>) -> Self {
        BBox { min: p, max: p }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point<Length>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include a rectangle given by its top-left corner and size
    pub fn expand_rect(&mut self, top_left: Point<Length>, size: Size<Length>) {
        self.expand_point(top_left);
        self.expand_point(Point { x: top_left.x + size.w, y: top_left.y + size.h });
    }

    pub fn min_x(&self) -> Length { self.min.x }
    pub fn max_x(&self) -> Length { self.max.x }
    pub fn min_y(&self) -> Length { self.min.y }
    pub fn max_y(&self) -> Length { self.max.y }

    pub fn width(&self) -> Length { self.max.x - self.min.x }

    pub fn height(&self) -> Length { self.max.y - self.min.y }

    pub fn size(&self) -> Size<Length> {
        Size { w: self.width(), h: self.height() }
    }

    /// Whether `p` lies inside the box (edges included)
    pub fn contains(&self, p: Point<Length>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Move the whole box by an offset
    pub fn translate(&mut self, offset: Offset<Length>) {
        self.min += offset;
        self.max += offset;
    }

    /// Grow the box by `pad` on every side
    pub fn inflate(&self, pad: Length) -> Self {
        BBox {
            min: Point::new(self.min.x - pad, self.min.y - pad),
            max: Point::new(self.max.x + pad, self.max.y + pad),
        }
    }
}

/// Convenient aliases
pub type Pt = Point<Length>;
pub type Bounds = BBox<Length>;
