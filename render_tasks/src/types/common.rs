//! Common geometric types.

// ============================================================================
// Extent2d
// ============================================================================

/// 2D extent of a surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2d {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent2d {
    /// Create a new extent.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The rectangle covering the whole extent.
    pub fn bounds(&self) -> IRect {
        IRect::from_xywh(0, 0, self.width as i32, self.height as i32)
    }
}

// ============================================================================
// Surface origin
// ============================================================================

/// Which corner of a surface row 0 refers to when it is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceOrigin {
    /// Row 0 is the top of the image.
    #[default]
    TopLeft,
    /// Row 0 is the bottom of the image (render-to-texture on GL-style backends).
    BottomLeft,
}

// ============================================================================
// IRect
// ============================================================================

/// Integer rectangle with exclusive right/bottom edges.
///
/// Empty rectangles (zero or negative area) are valid and compare as empty
/// regardless of where they sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IRect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl IRect {
    /// Create a rectangle from its edges.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::from_ltrb(x, y, x + width, y + height)
    }

    /// Rectangle width (zero when empty).
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    /// Rectangle height (zero when empty).
    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Smallest rectangle containing both. Empty inputs are ignored.
    pub fn union(&self, other: &IRect) -> IRect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        IRect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Overlap of both rectangles, if any.
    pub fn intersect(&self, other: &IRect) -> Option<IRect> {
        let rect = IRect::from_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!rect.is_empty()).then_some(rect)
    }

    /// Mirror the rectangle vertically within a surface of `height` rows.
    pub fn flipped_vertically(&self, height: i32) -> IRect {
        IRect::from_ltrb(self.left, height - self.bottom, self.right, height - self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_ignores_empty() {
        let a = IRect::from_xywh(0, 0, 10, 10);
        let empty = IRect::from_xywh(50, 50, 0, 0);
        assert_eq!(a.union(&empty), a);
        assert_eq!(empty.union(&a), a);
        assert_eq!(
            a.union(&IRect::from_xywh(5, 5, 10, 10)),
            IRect::from_ltrb(0, 0, 15, 15)
        );
    }

    #[test]
    fn test_intersect() {
        let a = IRect::from_xywh(0, 0, 10, 10);
        assert_eq!(
            a.intersect(&IRect::from_xywh(5, 5, 10, 10)),
            Some(IRect::from_ltrb(5, 5, 10, 10))
        );
        assert_eq!(a.intersect(&IRect::from_xywh(20, 20, 5, 5)), None);
    }

    #[test]
    fn test_flip() {
        let rect = IRect::from_ltrb(0, 0, 4, 2);
        assert_eq!(rect.flipped_vertically(10), IRect::from_ltrb(0, 8, 4, 10));
    }

    #[test]
    fn test_extent_bounds() {
        let extent = Extent2d::new(64, 32);
        assert_eq!(extent.bounds(), IRect::from_ltrb(0, 0, 64, 32));
    }
}
