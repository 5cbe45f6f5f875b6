//! Rectangle type for overlay layout

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// A `w` x `h` rect centred in this one (clamped to fit)
    pub fn centered(&self, w: f32, h: f32) -> Self {
        let w = w.min(self.w);
        let h = h.min(self.h);
        Self::new(self.x + (self.w - w) * 0.5, self.y + (self.h - h) * 0.5, w, h)
    }

    /// Horizontal strip from the top
    pub fn slice_top(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.w, height.min(self.h))
    }

    /// Remaining area after slicing top
    pub fn remaining_after_top(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.y + h, self.w, self.h - h)
    }

    /// Square of side `size` in the top-right corner, inset by `inset`
    pub fn top_right_square(&self, size: f32, inset: f32) -> Self {
        Self::new(self.right() - size - inset, self.y + inset, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }

    #[test]
    fn test_centered_clamps() {
        let r = Rect::screen(800.0, 600.0);
        assert_eq!(r.centered(200.0, 100.0), Rect::new(300.0, 250.0, 200.0, 100.0));
        assert_eq!(r.centered(1000.0, 100.0).w, 800.0);
    }

    #[test]
    fn test_slices() {
        let r = Rect::screen(800.0, 600.0);
        assert_eq!(r.slice_top(48.0).h, 48.0);
        assert_eq!(r.remaining_after_top(48.0), Rect::new(0.0, 48.0, 800.0, 552.0));
        assert_eq!(r.top_right_square(20.0, 10.0), Rect::new(770.0, 10.0, 20.0, 20.0));
    }
}
