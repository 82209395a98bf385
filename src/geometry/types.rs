//! Core types for panel geometry
//!
//! All coordinates are normalized figure coordinates: `(0, 0)` is the lower-left
//! corner of the canvas and `(1, 1)` the upper-right corner.

use std::fmt;

/// A 2D point in figure coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A panel rectangle stored as its lower-left corner plus width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xll: f64,
    pub yll: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub fn new(xll: f64, yll: f64, w: f64, h: f64) -> Self {
        Self { xll, yll, w, h }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.xll + self.w
    }

    /// Top edge y-coordinate
    pub fn top(&self) -> f64 {
        self.yll + self.h
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.xll + self.w / 2.0,
            y: self.yll + self.h / 2.0,
        }
    }

    /// The `(xll, yll, w, h)` tuple handed to a plotting host
    pub fn to_tuple(self) -> (f64, f64, f64, f64) {
        (self.xll, self.yll, self.w, self.h)
    }

    /// True when all four components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.xll.is_finite() && self.yll.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

impl From<(f64, f64, f64, f64)> for Bounds {
    fn from((xll, yll, w, h): (f64, f64, f64, f64)) -> Self {
        Self::new(xll, yll, w, h)
    }
}

impl From<[f64; 4]> for Bounds {
    fn from([xll, yll, w, h]: [f64; 4]) -> Self {
        Self::new(xll, yll, w, h)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}, {:.3})",
            self.xll, self.yll, self.w, self.h
        )
    }
}

/// Physical size of the figure canvas (inches, or any consistent unit)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height of the canvas
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Both sides finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::new(6.0, 6.0)
    }
}

impl fmt::Display for FigureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
