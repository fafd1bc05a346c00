use std::convert::TryFrom;

/// Axis-aligned pixel rectangle.
///
/// The rectangle is half-open: it contains every point with
/// `min_x <= x < max_x` and `min_y <= y < max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Build a rectangle from two corners, swapping coordinates so that
    /// `min <= max` on both axes.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Rect {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Rectangle anchored at the origin.
    ///
    /// Sizes beyond `i32::MAX` are clamped to `i32::MAX`.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    /// Number of columns, never negative.
    pub fn width(&self) -> usize {
        (self.max_x as i64 - self.min_x as i64).max(0) as usize
    }

    /// Number of rows, never negative.
    pub fn height(&self) -> usize {
        (self.max_y as i64 - self.min_y as i64).max(0) as usize
    }

    /// `true` when the rectangle holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Whether `(x, y)` lies inside the half-open bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Largest rectangle contained in both `self` and `other`.
    ///
    /// Returns the zero rectangle when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }
}
