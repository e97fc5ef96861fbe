//! Core geometry types: Offset, Size, Region.
//!
//! All coordinates are in terminal cells. Table content uses the same types in
//! "content space" (origin at the top-left of the header row); the viewport
//! translates between content space and screen space.

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` shares at least one cell with this region.
    #[inline]
    pub const fn overlaps(self, other: Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The overlapping part of two regions, or [`Region::EMPTY`].
    pub fn intersection(self, other: Region) -> Region {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Region::EMPTY
        } else {
            Region::new(x1, y1, x2 - x1, y2 - y1)
        }
    }

    /// Move the region by `offset`.
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region {
            x: self.x + offset.x,
            y: self.y + offset.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Split off the last `cols` columns: returns `(rest, right_strip)`.
    pub fn split_right(self, cols: i32) -> (Region, Region) {
        let cols = cols.clamp(0, self.width.max(0));
        (
            Region::new(self.x, self.y, self.width - cols, self.height),
            Region::new(self.right() - cols, self.y, cols, self.height),
        )
    }

    /// Split off the last `rows` rows: returns `(rest, bottom_strip)`.
    pub fn split_bottom(self, rows: i32) -> (Region, Region) {
        let rows = rows.clamp(0, self.height.max(0));
        (
            Region::new(self.x, self.y, self.width, self.height - rows),
            Region::new(self.x, self.bottom() - rows, self.width, rows),
        )
    }

    /// A `width` x `height` region centered inside this one, clamped to fit.
    pub fn centered(self, width: i32, height: i32) -> Region {
        let width = width.clamp(0, self.width.max(0));
        let height = height.clamp(0, self.height.max(0));
        Region::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}
