/// Widget size measured in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Narrow the width so it fits a grid with `columns` columns.
    pub fn fit_columns(self, columns: u32) -> Self {
        Self {
            w: self.w.min(columns),
            h: self.h,
        }
    }
}

/// Rectangle anchored within the dashboard grid, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn at(x: u32, y: u32, size: Size) -> Self {
        Self::new(x, y, size.w, size.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Axis-aligned bounding-box intersection. Touching edges do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 4, 3);
        assert!(!a.intersects(&Rect::new(4, 0, 4, 3)));
        assert!(!a.intersects(&Rect::new(0, 3, 4, 3)));
    }

    #[test]
    fn overlapping_rects_intersect_both_ways() {
        let a = Rect::new(0, 0, 4, 3);
        let b = Rect::new(3, 2, 2, 2);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn fit_columns_only_narrows() {
        assert_eq!(Size::new(6, 4).fit_columns(2), Size::new(2, 4));
        assert_eq!(Size::new(2, 2).fit_columns(12), Size::new(2, 2));
    }
}
