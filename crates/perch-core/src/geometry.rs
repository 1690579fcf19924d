#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixel space.
//!
//! Unlike cell grids, document geometry is fractional and may be negative
//! (an element scrolled above its container has a negative top), so every
//! coordinate here is an `f64`.

/// Off-screen coordinate used for hidden surfaces.
///
/// A hidden surface is parked here rather than left unset so that it never
/// flashes at a stale position when shown again before layout settles.
pub const OFFSCREEN: f64 = -10000.0;

/// A point (or offset) with `x` growing rightwards and `y` downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// The off-screen parking position.
    pub const OFFSCREEN: Self = Self::new(OFFSCREEN, OFFSCREEN);
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Check if either dimension is zero (or negative).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Replace zero dimensions with the matching dimension of `fallback`.
    ///
    /// Mirrors how bounding boxes of inline or not-yet-laid-out elements
    /// report zero while their offset box already has a size.
    #[must_use]
    pub fn or_else(self, fallback: Size) -> Size {
        Size {
            width: if self.width == 0.0 {
                fallback.width
            } else {
                self.width
            },
            height: if self.height == 0.0 {
                fallback.height
            } else {
                self.height
            },
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Translate the rectangle by an offset.
    #[must_use]
    pub fn translate(&self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }
}

/// Position and rendered size of an element, relative to its positioning
/// root (the nearest non-statically-positioned ancestor, or the document).
///
/// Always measured fresh; host and tooltip sizes can change between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
}

impl BoxMetrics {
    /// Create new box metrics.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top,
            left,
        }
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

impl From<Rect> for BoxMetrics {
    fn from(r: Rect) -> Self {
        BoxMetrics::new(r.y, r.x, r.width, r.height)
    }
}
